//! Data-driven game balance
//!
//! Every rule the engine applies (grid size, points, spawn cadence, lifetimes)
//! lives here so that board variants are configuration, not code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::sim::{Cell, Grid};

/// Reasons a tuning set is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuningError {
    /// JSON could not be parsed
    Parse(String),
    /// Fewer than two cells: nowhere to put the bird beside the cat
    GridTooSmall { width: i32, height: i32 },
    StartOutsideGrid { start: Cell },
    /// A `min..max` pair is inverted (or empty for half-open ranges)
    BadRange { field: &'static str, min: u32, max: u32 },
    ZeroAttempts { field: &'static str },
    /// `dog_spread` is not finite or reaches past the grid
    BadDogSpread,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid tuning JSON: {msg}"),
            Self::GridTooSmall { width, height } => {
                write!(f, "grid {width}x{height} needs at least 2 cells")
            }
            Self::StartOutsideGrid { start } => {
                write!(f, "start cell ({}, {}) is outside the grid", start.x, start.y)
            }
            Self::BadRange { field, min, max } => {
                write!(f, "{field}: range {min}..{max} is empty")
            }
            Self::ZeroAttempts { field } => write!(f, "{field} must be at least 1"),
            Self::BadDogSpread => {
                write!(f, "dog_spread must be finite and at most the grid size")
            }
        }
    }
}

impl std::error::Error for TuningError {}

/// Game rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Where the cat starts each session
    pub start: Cell,

    pub bird_points: u64,
    pub tuna_points: u64,

    /// Rejection-sampling attempts before the food placement scans the grid
    pub food_attempts: u32,

    // === Dogs ===
    pub dogs_enabled: bool,
    /// Birds eaten before the next dog, drawn from `min..=max`
    pub dog_threshold_min: u32,
    pub dog_threshold_max: u32,
    /// Dogs land within this many cells of the bird on each axis
    pub dog_spread: f64,
    pub dog_near_attempts: u32,
    pub dog_fallback_attempts: u32,
    /// Minimum Chebyshev distance between a new dog and the cat's head
    pub dog_min_head_distance: i32,
    /// Real-time dog lifetime, converted to ticks at spawn
    pub dog_lifetime_ms: u32,

    // === Tuna cans ===
    pub tuna_enabled: bool,
    /// Ticks between cans, drawn from `min..max`
    pub tuna_interval_min: u32,
    pub tuna_interval_max: u32,
    pub tuna_attempts: u32,
    /// Lifetime is `max(floor, base - speed * step)` milliseconds
    pub tuna_lifetime_base_ms: u32,
    pub tuna_lifetime_step_ms: u32,
    pub tuna_lifetime_floor_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_width: consts::GRID_WIDTH,
            grid_height: consts::GRID_HEIGHT,
            start: consts::START_CELL,

            bird_points: 10,
            tuna_points: 50,

            food_attempts: 1000,

            dogs_enabled: true,
            dog_threshold_min: 2,
            dog_threshold_max: 3,
            dog_spread: 6.0,
            dog_near_attempts: 50,
            dog_fallback_attempts: 100,
            dog_min_head_distance: 2,
            dog_lifetime_ms: 10_000,

            tuna_enabled: true,
            tuna_interval_min: 300,
            tuna_interval_max: 700,
            tuna_attempts: 100,
            tuna_lifetime_base_ms: 8000,
            tuna_lifetime_step_ms: 500,
            tuna_lifetime_floor_ms: 3000,
        }
    }
}

impl Tuning {
    /// Classic board without obstacles or bonuses
    pub fn classic() -> Self {
        Self {
            dogs_enabled: false,
            tuna_enabled: false,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON tuning file (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.grid_width <= 0
            || self.grid_height <= 0
            || i64::from(self.grid_width) * i64::from(self.grid_height) < 2
        {
            return Err(TuningError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if !self.grid().contains(self.start) {
            return Err(TuningError::StartOutsideGrid { start: self.start });
        }
        if self.food_attempts == 0 {
            return Err(TuningError::ZeroAttempts {
                field: "food_attempts",
            });
        }
        let max_spread = f64::from(self.grid_width.max(self.grid_height));
        if !(self.dog_spread.is_finite() && (0.0..=max_spread).contains(&self.dog_spread)) {
            return Err(TuningError::BadDogSpread);
        }
        if self.dog_threshold_min == 0 || self.dog_threshold_min > self.dog_threshold_max {
            return Err(TuningError::BadRange {
                field: "dog_threshold",
                min: self.dog_threshold_min,
                max: self.dog_threshold_max,
            });
        }
        if self.tuna_interval_min == 0 || self.tuna_interval_min >= self.tuna_interval_max {
            return Err(TuningError::BadRange {
                field: "tuna_interval",
                min: self.tuna_interval_min,
                max: self.tuna_interval_max,
            });
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width.max(1), self.grid_height.max(1))
    }

    /// Dog lifetime in ticks for the given tick interval
    pub fn dog_lifetime_ticks(&self, interval_ms: u32) -> u32 {
        (self.dog_lifetime_ms / interval_ms.max(1)).max(1)
    }

    /// Tuna lifetime in ticks; faster speeds shorten the real-time window
    pub fn tuna_lifetime_ticks(&self, speed: u8, interval_ms: u32) -> u32 {
        let window = self
            .tuna_lifetime_base_ms
            .saturating_sub(u32::from(speed).saturating_mul(self.tuna_lifetime_step_ms))
            .max(self.tuna_lifetime_floor_ms);
        (window / interval_ms.max(1)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick_interval_ms;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
        assert_eq!(Tuning::classic().validate(), Ok(()));
    }

    #[test]
    fn test_dog_lifetime_is_ten_seconds() {
        let tuning = Tuning::default();
        // speed 5 -> 200ms ticks
        assert_eq!(tuning.dog_lifetime_ticks(200), 50);
        // speed 10 -> 50ms ticks
        assert_eq!(tuning.dog_lifetime_ticks(50), 200);
        // speed 1 -> 320ms ticks, floored
        assert_eq!(tuning.dog_lifetime_ticks(320), 31);
    }

    #[test]
    fn test_tuna_lifetime_scales_with_speed() {
        let tuning = Tuning::default();
        // speed 1: 7500ms window at 320ms
        assert_eq!(tuning.tuna_lifetime_ticks(1, tick_interval_ms(1)), 23);
        // speed 5: 5500ms at 200ms
        assert_eq!(tuning.tuna_lifetime_ticks(5, tick_interval_ms(5)), 27);
        // speed 10: clamped to the 3000ms floor at 50ms
        assert_eq!(tuning.tuna_lifetime_ticks(10, tick_interval_ms(10)), 60);
    }

    #[test]
    fn test_huge_tuna_step_hits_the_floor() {
        let tuning = Tuning::from_json(r#"{"tuna_lifetime_step_ms": 4000000000}"#).unwrap();
        assert_eq!(tuning.tuna_lifetime_ticks(10, 50), 60);
    }

    #[test]
    fn test_spread_as_wide_as_the_grid_is_accepted() {
        let tuning = Tuning::from_json(r#"{"dog_spread": 20.0}"#).unwrap();
        assert_eq!(tuning.dog_spread, 20.0);
    }

    #[test]
    fn test_from_json_partial() {
        let tuning = Tuning::from_json(r#"{"grid_width": 20, "grid_height": 27, "dogs_enabled": false}"#)
            .unwrap();
        assert_eq!(tuning.grid_height, 27);
        assert!(!tuning.dogs_enabled);
        assert_eq!(tuning.bird_points, 10);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
        assert_eq!(
            Tuning::from_json(r#"{"grid_width": 0}"#),
            Err(TuningError::GridTooSmall { width: 0, height: 20 })
        );
        assert_eq!(
            Tuning::from_json(r#"{"grid_width": 1, "grid_height": 1, "start": {"x": 0, "y": 0}}"#),
            Err(TuningError::GridTooSmall { width: 1, height: 1 })
        );
        assert_eq!(
            Tuning::from_json(r#"{"dog_spread": 1e308}"#),
            Err(TuningError::BadDogSpread)
        );
        assert_eq!(
            Tuning::from_json(r#"{"dog_spread": -1.0}"#),
            Err(TuningError::BadDogSpread)
        );
        assert_eq!(
            Tuning::from_json(r#"{"grid_width": 8, "grid_height": 8}"#),
            Err(TuningError::StartOutsideGrid {
                start: Cell::new(10, 10)
            })
        );
        assert!(matches!(
            Tuning::from_json(r#"{"tuna_interval_min": 700, "tuna_interval_max": 300}"#),
            Err(TuningError::BadRange { field: "tuna_interval", .. })
        ));
    }
}
