//! Session controller
//!
//! Owns the simulation plus everything that outlives a single run: the
//! store, the high score and the settings. Hosts talk to this type only.

use crate::highscores::HighScore;
use crate::platform::{Action, KeyValueStore};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, Snapshot};
use crate::tuning::Tuning;

/// A game bound to a storage backend
pub struct Game<S: KeyValueStore> {
    pub state: GameState,
    pub settings: Settings,
    high_score: HighScore,
    store: S,
}

impl<S: KeyValueStore> Game<S> {
    /// Load persisted data and open a session in the menu
    pub fn new(store: S, seed: u64, tuning: Tuning) -> Self {
        let high_score = HighScore::load(&store);
        let settings = Settings::load(&store);
        let mut state = GameState::new(seed, tuning);
        state.high_score = high_score.best;

        Self {
            state,
            settings,
            high_score,
            store,
        }
    }

    pub fn start(&mut self) -> bool {
        sim::start(&mut self.state)
    }

    pub fn toggle_pause(&mut self) -> bool {
        sim::toggle_pause(&mut self.state)
    }

    /// Leave the run for the menu, saving a new record right away
    pub fn to_menu(&mut self) -> bool {
        if !sim::to_menu(&mut self.state) {
            return false;
        }
        if self.high_score.qualifies(self.state.high_score) {
            self.high_score.best = self.state.high_score;
            if let Err(e) = self.high_score.save(&mut self.store) {
                log::warn!("Failed to save high score: {}", e);
            }
        }
        true
    }

    pub fn jump(&mut self) -> bool {
        sim::jump(&mut self.state)
    }

    pub fn boost(&mut self) -> bool {
        sim::boost(&mut self.state)
    }

    /// Dispatch a mapped key
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Jump => self.jump(),
            Action::Boost => self.boost(),
            Action::TogglePause => self.toggle_pause(),
        }
    }

    /// Feed host time into the session
    pub fn advance(&mut self, elapsed_ms: u64) {
        sim::advance(&mut self.state, elapsed_ms);
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    /// Clear the record, in memory and in storage
    pub fn reset_high_score(&mut self) {
        if let Err(e) = self.high_score.reset(&mut self.store) {
            log::warn!("Failed to clear high score: {}", e);
        }
        self.state.high_score = 0;
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        self.save_settings();
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.settings.set_sfx_volume(vol);
        self.save_settings();
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(&mut self.store) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Take pending events for sound and display
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Give the storage backend back (ends the game)
    pub fn into_store(self) -> S {
        self.store
    }
}
