//! Best-score record
//!
//! A single integer persisted as a decimal string, read once at startup.

use crate::platform::{KeyValueStore, StorageError};

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "runnerHighScore";

    /// Parse a stored value. Absent or malformed data counts as no record.
    pub fn parse(raw: Option<&str>) -> Self {
        let best = match raw {
            Some(text) => match text.trim().parse::<u64>() {
                Ok(value) => value,
                Err(_) => {
                    log::warn!("Ignoring malformed high score {:?}", text);
                    0
                }
            },
            None => 0,
        };
        Self { best }
    }

    /// Load the record from storage
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(raw) => {
                let score = Self::parse(raw.as_deref());
                log::info!("Loaded high score {}", score.best);
                score
            }
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                Self::default()
            }
        }
    }

    /// Check if a score beats the record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Persist the current record
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.set(Self::STORAGE_KEY, &self.best.to_string())?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }

    /// Forget the record and remove it from storage
    pub fn reset(&mut self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        self.best = 0;
        store.remove(Self::STORAGE_KEY)?;
        log::info!("High score reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_parse_defaults_to_zero() {
        assert_eq!(HighScore::parse(None).best, 0);
        assert_eq!(HighScore::parse(Some("")).best, 0);
        assert_eq!(HighScore::parse(Some("abc")).best, 0);
        assert_eq!(HighScore::parse(Some("-5")).best, 0);
        assert_eq!(HighScore::parse(Some("12.5")).best, 0);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(HighScore::parse(Some("150")).best, 150);
        assert_eq!(HighScore::parse(Some(" 7 \n")).best, 7);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let score = HighScore { best: 321 };
        score.save(&mut store).unwrap();

        assert_eq!(
            store.get(HighScore::STORAGE_KEY).unwrap().as_deref(),
            Some("321")
        );
        assert_eq!(HighScore::load(&store), score);
    }

    #[test]
    fn test_reset_removes_key() {
        let mut store = MemoryStore::with_item(HighScore::STORAGE_KEY, "99");
        let mut score = HighScore::load(&store);
        assert_eq!(score.best, 99);

        score.reset(&mut store).unwrap();
        assert_eq!(score.best, 0);
        assert_eq!(store.get(HighScore::STORAGE_KEY).unwrap(), None);
        assert_eq!(HighScore::load(&store).best, 0);
    }

    #[test]
    fn test_qualifies_strictly() {
        let score = HighScore { best: 100 };
        assert!(score.qualifies(101));
        assert!(!score.qualifies(100));
        assert!(!score.qualifies(0));
    }
}
