//! Obstacle spawner
//!
//! Runs once per spawn interval. The chance of a new obstacle grows with
//! speed but never reaches certainty at the default tuning (0.8 at speed 5),
//! so gaps stay possible at any speed.

use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Probability that a spawn check produces an obstacle
pub fn spawn_probability(speed: f32, tuning: &Tuning) -> f32 {
    (tuning.spawn_base_chance + speed * tuning.spawn_speed_factor).min(1.0)
}

/// Place an obstacle of the given kind at the spawn edge
pub fn spawn_obstacle(state: &mut GameState, kind: ObstacleKind) -> u32 {
    let id = state.next_obstacle_id();
    let obstacle = Obstacle::new(id, state.tuning.spawn_x, kind);
    log::debug!("Spawned {:?} #{} at x={}", kind, id, obstacle.x);
    state.obstacles.push(obstacle);
    state.emit(GameEvent::Spawned(kind));
    id
}

/// One spawn check: draw a kind, then roll against the spawn probability
pub fn spawn_check(state: &mut GameState) -> Option<u32> {
    let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
    let roll: f32 = state.rng.random();
    if roll < spawn_probability(state.speed, &state.tuning) {
        Some(spawn_obstacle(state, kind))
    } else {
        None
    }
}
