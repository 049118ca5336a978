//! Property tests for the simulation invariants

use proptest::prelude::*;

use runner_game::Tuning;
use runner_game::sim::{
    self, Aabb, GamePhase, GameState, Obstacle, ObstacleKind, check_collision,
};

/// Host-side operation applied to a session
#[derive(Debug, Clone, Copy)]
enum Op {
    Advance(u64),
    Jump,
    Boost,
    TogglePause,
    Start,
    ToMenu,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..400).prop_map(Op::Advance),
        2 => Just(Op::Jump),
        3 => Just(Op::Boost),
        1 => Just(Op::TogglePause),
        1 => Just(Op::Start),
        1 => Just(Op::ToMenu),
    ]
}

fn apply(state: &mut GameState, op: Op) {
    match op {
        Op::Advance(ms) => sim::advance(state, ms),
        Op::Jump => {
            sim::jump(state);
        }
        Op::Boost => {
            sim::boost(state);
        }
        Op::TogglePause => {
            sim::toggle_pause(state);
        }
        Op::Start => {
            sim::start(state);
        }
        Op::ToMenu => {
            sim::to_menu(state);
        }
    }
}

fn kind() -> impl Strategy<Value = ObstacleKind> {
    prop_oneof![
        Just(ObstacleKind::Rock),
        Just(ObstacleKind::Spike),
        Just(ObstacleKind::Bird),
    ]
}

fn aabb() -> impl Strategy<Value = Aabb> {
    (-500.0f32..500.0, -500.0f32..500.0, 0.1f32..200.0, 0.1f32..200.0)
        .prop_map(|(x, y, w, h)| Aabb::from_origin_size(x, y, w, h))
}

proptest! {
    #[test]
    fn speed_stays_in_range(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..200)) {
        let tuning = Tuning::default();
        let mut state = GameState::new(seed, tuning.clone());
        sim::start(&mut state);
        for op in ops {
            apply(&mut state, op);
            prop_assert!(state.speed >= tuning.min_speed && state.speed <= tuning.max_speed,
                "speed {} out of range", state.speed);
        }
    }

    #[test]
    fn score_monotonic_while_playing_frozen_otherwise(
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 1..200),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        sim::start(&mut state);
        for op in ops {
            let before_phase = state.phase;
            let before_score = state.score;
            let before_obstacles = state.obstacles.clone();
            apply(&mut state, op);

            if let Op::Advance(_) = op {
                if before_phase == GamePhase::Playing {
                    prop_assert!(state.score >= before_score);
                } else {
                    prop_assert_eq!(state.score, before_score);
                    prop_assert_eq!(&state.obstacles, &before_obstacles);
                }
            }
        }
    }

    #[test]
    fn no_obstacle_survives_past_cull_line(
        xs in prop::collection::vec((-60.0f32..900.0, kind()), 0..30),
        ticks in 1usize..40,
    ) {
        // Player airborne for the whole test so collisions don't stop ticking
        let tuning = Tuning {
            spawn_base_chance: 0.0,
            spawn_speed_factor: 0.0,
            jump_duration_ms: u64::MAX / 4,
            ..Default::default()
        };
        let mut state = GameState::new(1, tuning);
        sim::start(&mut state);
        sim::jump(&mut state);
        for (id, (x, kind)) in xs.into_iter().enumerate() {
            state.obstacles.push(Obstacle::new(id as u32, x, kind));
        }

        for _ in 0..ticks {
            sim::tick(&mut state);
            prop_assert!(state.obstacles.iter().all(|o| o.x > -50.0));
        }
    }

    #[test]
    fn identical_boxes_collide(b in aabb()) {
        prop_assert!(b.overlaps(&b));
    }

    #[test]
    fn horizontally_disjoint_boxes_never_collide(a in aabb(), gap in 0.0f32..100.0, b in aabb()) {
        // b moved so its left edge sits at or right of a's right edge
        let size = b.max - b.min;
        let moved = Aabb::from_origin_size(a.max.x + gap, b.min.y, size.x, size.y);
        prop_assert!(!a.overlaps(&moved));
        prop_assert!(!moved.overlaps(&a));
    }

    #[test]
    fn vertically_disjoint_boxes_never_collide(a in aabb(), gap in 0.0f32..100.0, b in aabb()) {
        let size = b.max - b.min;
        let moved = Aabb::from_origin_size(b.min.x, a.max.y + gap, size.x, size.y);
        prop_assert!(!a.overlaps(&moved));
        prop_assert!(!moved.overlaps(&a));
    }

    #[test]
    fn far_obstacles_never_hit(x in 120.0f32..800.0, kind in kind(), jumping in any::<bool>()) {
        let mut state = GameState::new(1, Tuning::default());
        if jumping {
            state.player.take_off();
        }
        let obstacles = [Obstacle::new(0, x, kind)];
        prop_assert!(!check_collision(&state.player, &obstacles));
    }
}
