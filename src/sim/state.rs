//! Game state and core simulation types
//!
//! A `GameState` is one session: everything the tick, spawner and actions
//! mutate lives here, nothing is global.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::schedule::Schedule;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Rock,
    Spike,
    Bird,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Rock, ObstacleKind::Spike, ObstacleKind::Bird];

    /// Height of the hitbox
    pub fn height(&self) -> f32 {
        match self {
            ObstacleKind::Rock => 50.0,
            ObstacleKind::Spike => 60.0,
            ObstacleKind::Bird => 40.0,
        }
    }

    /// Bottom edge of the hitbox (birds fly in the elevated lane)
    pub fn base_y(&self) -> f32 {
        match self {
            ObstacleKind::Bird => BIRD_LANE_Y,
            ObstacleKind::Rock | ObstacleKind::Spike => 0.0,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ObstacleKind::Rock => "🪨",
            ObstacleKind::Spike => "⚡",
            ObstacleKind::Bird => "🦅",
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge in world space (decreases every tick)
    pub x: f32,
    pub kind: ObstacleKind,
    pub height: f32,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, kind: ObstacleKind) -> Self {
        Self {
            id,
            x,
            kind,
            height: kind.height(),
        }
    }
}

/// The runner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Bottom edge
    pub y: f32,
    pub jumping: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            y: PLAYER_GROUND_Y,
            jumping: false,
        }
    }
}

impl Player {
    pub fn take_off(&mut self) {
        self.y = PLAYER_JUMP_Y;
        self.jumping = true;
    }

    pub fn land(&mut self) {
        self.y = PLAYER_GROUND_Y;
        self.jumping = false;
    }
}

/// Things that happened during a tick or action, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    Started,
    Jumped,
    Boosted,
    Spawned(ObstacleKind),
    Crashed { score: u64 },
    NewHighScore(u64),
}

/// Periodic tasks owned by the session. `None` means stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PeriodicTasks {
    pub next_tick_ms: Option<u64>,
    pub next_spawn_ms: Option<u64>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score known to this session (loaded by the host)
    pub high_score: u64,
    /// Speed multiplier, always within the tuning's speed range
    pub speed: f32,
    pub player: Player,
    /// Active obstacles (ascending id)
    pub obstacles: Vec<Obstacle>,
    /// Session clock (ms). Only advances while playing.
    pub clock_ms: u64,
    pub tuning: Tuning,
    pub(crate) tasks: PeriodicTasks,
    pub(crate) deferred: Schedule,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Create a session in the menu
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0,
            high_score: 0,
            speed: tuning.min_speed,
            player: Player::default(),
            obstacles: Vec::new(),
            clock_ms: 0,
            tuning,
            tasks: PeriodicTasks::default(),
            deferred: Schedule::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 0,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn reset_obstacle_ids(&mut self) {
        self.next_id = 0;
    }

    /// Number of one-shot actions still pending
    pub fn pending_actions(&self) -> usize {
        self.deferred.len()
    }

    /// Whether the tick/spawn tasks are running
    pub fn tasks_running(&self) -> bool {
        self.tasks.next_tick_ms.is_some() && self.tasks.next_spawn_ms.is_some()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// View for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            player_y: self.player.y,
            is_jumping: self.player.jumping,
            speed: self.speed,
            obstacles: self.obstacles.clone(),
        }
    }
}

/// Read-only view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub player_y: f32,
    pub is_jumping: bool,
    pub speed: f32,
    pub obstacles: Vec<Obstacle>,
}

impl Snapshot {
    /// True when the score on screen beats the stored record
    pub fn is_new_record(&self) -> bool {
        self.score > self.high_score
    }
}
