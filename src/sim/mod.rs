//! Simulation module
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - Session clock driven by the caller, no wall-clock reads
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod schedule;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, check_collision, first_collision, obstacle_box, player_box};
pub use schedule::{DeferredAction, Schedule};
pub use spawner::{spawn_check, spawn_obstacle, spawn_probability};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player, Snapshot};
pub use tick::{advance, boost, jump, start, tick, to_menu, toggle_pause};
