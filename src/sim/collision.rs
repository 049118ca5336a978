//! Collision detection
//!
//! Everything in the runner is an axis-aligned box: the player, rocks,
//! spikes and birds. Y grows upward from the ground line.

use glam::Vec2;

use super::state::{Obstacle, Player};
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from its bottom-left corner and size
    pub fn from_origin_size(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + w, y + h))
    }

    /// Strict overlap test: boxes that share only an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// Hitbox of the player at its current height
pub fn player_box(player: &Player) -> Aabb {
    Aabb::from_origin_size(PLAYER_LEFT, player.y, PLAYER_WIDTH, PLAYER_HEIGHT)
}

/// Hitbox of an obstacle; birds sit in the elevated lane
pub fn obstacle_box(obstacle: &Obstacle) -> Aabb {
    Aabb::from_origin_size(
        obstacle.x,
        obstacle.kind.base_y(),
        OBSTACLE_WIDTH,
        obstacle.height,
    )
}

/// First obstacle the player overlaps, if any
pub fn first_collision<'a>(player: &Player, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let player = player_box(player);
    obstacles.iter().find(|o| player.overlaps(&obstacle_box(o)))
}

/// Check whether the player touches any obstacle
pub fn check_collision(player: &Player, obstacles: &[Obstacle]) -> bool {
    first_collision(player, obstacles).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    fn grounded() -> Player {
        Player::default()
    }

    fn airborne() -> Player {
        let mut p = Player::default();
        p.take_off();
        p
    }

    #[test]
    fn test_identical_boxes_overlap() {
        let a = Aabb::from_origin_size(10.0, 10.0, 5.0, 5.0);
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::from_origin_size(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::from_origin_size(10.0, 0.0, 10.0, 10.0);
        let above = Aabb::from_origin_size(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&above));
    }

    #[test]
    fn test_spike_hits_grounded_player() {
        // Player [80,120]x[50,110], spike [60,100]x[0,60]
        let obstacles = [Obstacle::new(0, 60.0, ObstacleKind::Spike)];
        assert!(check_collision(&grounded(), &obstacles));
    }

    #[test]
    fn test_rock_only_touches_grounded_player() {
        // Rock top edge (50) meets the player's feet (50)
        let obstacles = [Obstacle::new(0, 60.0, ObstacleKind::Rock)];
        assert!(!check_collision(&grounded(), &obstacles));
    }

    #[test]
    fn test_bird_hits_grounded_player() {
        // Bird [90,130]x[80,120] overlaps player [80,120]x[50,110]
        let obstacles = [Obstacle::new(0, 90.0, ObstacleKind::Bird)];
        assert!(check_collision(&grounded(), &obstacles));
    }

    #[test]
    fn test_jump_clears_everything() {
        let obstacles: Vec<_> = ObstacleKind::ALL
            .iter()
            .enumerate()
            .map(|(i, &kind)| Obstacle::new(i as u32, 90.0, kind))
            .collect();
        assert!(!check_collision(&airborne(), &obstacles));
    }

    #[test]
    fn test_horizontal_miss() {
        let ahead = [Obstacle::new(0, 120.0, ObstacleKind::Spike)];
        let behind = [Obstacle::new(0, 40.0, ObstacleKind::Spike)];
        assert!(!check_collision(&grounded(), &ahead));
        assert!(!check_collision(&grounded(), &behind));
    }

    #[test]
    fn test_first_collision_returns_earliest() {
        let obstacles = [
            Obstacle::new(0, 500.0, ObstacleKind::Spike),
            Obstacle::new(1, 100.0, ObstacleKind::Spike),
            Obstacle::new(2, 95.0, ObstacleKind::Bird),
        ];
        assert_eq!(first_collision(&grounded(), &obstacles).map(|o| o.id), Some(1));
    }

    #[test]
    fn test_empty_world() {
        assert!(!check_collision(&grounded(), &[]));
    }
}
