//! Game settings and preferences
//!
//! Persisted separately from the high score, as JSON.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, StorageError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play sound effects
    pub sound_enabled: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "runnerSettings";

    /// Set volume, clamped to [0, 1]
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) };
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            self.sfx_volume
        } else {
            0.0
        }
    }

    /// Load settings from storage, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.set_sfx_volume(settings.sfx_volume);
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to storage
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(self).map_err(|e| StorageError::Backend(e.to_string()))?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
