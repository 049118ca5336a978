//! Runner - A side-scrolling emoji runner arcade game
//!
//! Core modules:
//! - `sim`: Simulation (state machine, spawner, tick, collisions, deferred actions)
//! - `game`: Session controller tying the simulation to storage and settings
//! - `platform`: Browser/native platform abstraction (storage, input)
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound effects for game events

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (world geometry)
pub mod consts {
    /// Longest slice of host time fed to the simulation in one call (ms).
    /// A stalled tab resumes with at most this much catch-up.
    pub const MAX_FRAME_MS: u64 = 250;

    /// Player horizontal span (fixed, the world scrolls past)
    pub const PLAYER_LEFT: f32 = 80.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;

    /// Player vertical positions (bottom edge)
    pub const PLAYER_GROUND_Y: f32 = 50.0;
    pub const PLAYER_JUMP_Y: f32 = 150.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    /// Bottom edge of the elevated lane birds fly in
    pub const BIRD_LANE_Y: f32 = 80.0;
}
