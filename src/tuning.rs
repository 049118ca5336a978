//! Data-driven game balance
//!
//! Every number that shapes difficulty lives here so balance experiments
//! can be run from a JSON file without touching the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error loading or validating a tuning table
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// JSON could not be parsed
    Parse(String),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "failed to parse tuning: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Longest accepted period or delay (ms)
pub const MAX_PERIOD_MS: u64 = 60 * 60 * 1000;

/// Balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Physics tick period (ms)
    pub tick_ms: u64,
    /// Spawn check period (ms)
    pub spawn_interval_ms: u64,
    /// Spawn chance at speed 0
    pub spawn_base_chance: f32,
    /// Spawn chance added per unit of speed
    pub spawn_speed_factor: f32,
    /// Scroll distance per tick before speed is added
    pub base_scroll: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Speed added by one boost
    pub boost_amount: f32,
    /// Speed removed when a boost wears off
    pub boost_decay: f32,
    /// Delay before a boost wears off (ms)
    pub boost_decay_delay_ms: u64,
    /// Time spent airborne per jump (ms)
    pub jump_duration_ms: u64,
    /// World x where obstacles appear
    pub spawn_x: f32,
    /// Obstacles at or left of this x are culled
    pub cull_x: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            spawn_interval_ms: 1000,
            spawn_base_chance: 0.3,
            spawn_speed_factor: 0.1,
            base_scroll: 3.0,
            min_speed: 1.0,
            max_speed: 5.0,
            boost_amount: 0.5,
            boost_decay: 0.3,
            boost_decay_delay_ms: 1000,
            jump_duration_ms: 600,
            spawn_x: 800.0,
            cull_x: -50.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let periods = [
            ("tick_ms", self.tick_ms),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("boost_decay_delay_ms", self.boost_decay_delay_ms),
            ("jump_duration_ms", self.jump_duration_ms),
        ];
        for (field, ms) in periods {
            if ms > MAX_PERIOD_MS {
                return invalid(field, "must not exceed one hour");
            }
        }
        if self.tick_ms == 0 {
            return invalid("tick_ms", "must be positive");
        }
        if self.spawn_interval_ms == 0 {
            return invalid("spawn_interval_ms", "must be positive");
        }

        let values = [
            ("spawn_base_chance", self.spawn_base_chance),
            ("spawn_speed_factor", self.spawn_speed_factor),
            ("base_scroll", self.base_scroll),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("boost_amount", self.boost_amount),
            ("boost_decay", self.boost_decay),
            ("spawn_x", self.spawn_x),
            ("cull_x", self.cull_x),
        ];
        for (field, value) in values {
            if !value.is_finite() {
                return invalid(field, "must be finite");
            }
        }
        for &(field, value) in &values[..3] {
            if value < 0.0 {
                return invalid(field, "must not be negative");
            }
        }
        if self.boost_amount < 0.0 {
            return invalid("boost_amount", "must not be negative");
        }
        if self.boost_decay < 0.0 {
            return invalid("boost_decay", "must not be negative");
        }
        if self.min_speed <= 0.0 {
            return invalid("min_speed", "must be positive");
        }
        if self.max_speed < self.min_speed {
            return invalid("max_speed", "must not be below min_speed");
        }
        if self.cull_x >= self.spawn_x {
            return invalid("cull_x", "must be left of spawn_x");
        }
        Ok(())
    }

    /// Clamp a speed into the playable range
    #[inline]
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        speed.clamp(self.min_speed, self.max_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_speed": 8.0, "tick_ms": 40 }"#).unwrap();
        assert_eq!(tuning.max_speed, 8.0);
        assert_eq!(tuning.tick_ms, 40);
        assert_eq!(tuning.spawn_interval_ms, 1000);
        assert_eq!(tuning.spawn_x, 800.0);
    }

    #[test]
    fn test_rejects_zero_tick() {
        let err = Tuning::from_json(r#"{ "tick_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "tick_ms", .. }));
    }

    #[test]
    fn test_rejects_oversized_delays() {
        let err = Tuning::from_json(r#"{ "jump_duration_ms": 18446744073709551615 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "jump_duration_ms", .. }));

        let tuning = Tuning {
            boost_decay_delay_ms: MAX_PERIOD_MS + 1,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "boost_decay_delay_ms", .. })
        ));

        let tuning = Tuning {
            spawn_interval_ms: MAX_PERIOD_MS,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let tuning = Tuning {
            max_speed: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "max_speed", reason: "must be finite" })
        ));

        let tuning = Tuning {
            boost_decay: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "boost_decay", .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let tuning = Tuning {
            min_speed: 3.0,
            max_speed: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "max_speed", .. })
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse tuning"));
    }

    #[test]
    fn test_clamp_speed() {
        let tuning = Tuning::default();
        assert_eq!(tuning.clamp_speed(0.2), 1.0);
        assert_eq!(tuning.clamp_speed(7.0), 5.0);
        assert_eq!(tuning.clamp_speed(2.5), 2.5);
    }
}
