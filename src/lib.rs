//! Cat & Birds - a wrap-around grid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawns, scoring)
//! - `game`: Menu / playing / paused / game-over lifecycle around a session
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (speed, cat)
//! - `highscores`: Best score tracking
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `platform`: Input mapping and the fixed-step tick driver

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{Game, GamePhase};
pub use highscores::HighScore;
pub use settings::{CatStyle, Character, Settings, Speed};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use crate::sim::Cell;

    /// Board size in cells
    pub const GRID_WIDTH: i32 = 20;
    pub const GRID_HEIGHT: i32 = 20;
    pub const START_CELL: Cell = Cell::new(10, 10);

    /// Speed slider bounds
    pub const MIN_SPEED: u8 = 1;
    pub const MAX_SPEED: u8 = 10;
    pub const DEFAULT_SPEED: u8 = 5;

    /// Tick interval bounds (ms)
    pub const BASE_TICK_MS: u32 = 350;
    pub const TICK_MS_PER_SPEED: u32 = 30;
    pub const MIN_TICK_MS: u32 = 50;

    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
}

/// Tick interval for a speed setting: speed 1 = 320ms, speed 10 = 50ms
#[inline]
pub fn tick_interval_ms(speed: u8) -> u32 {
    use consts::*;
    BASE_TICK_MS
        .saturating_sub(u32::from(speed) * TICK_MS_PER_SPEED)
        .max(MIN_TICK_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval_ms(1), 320);
        assert_eq!(tick_interval_ms(5), 200);
        assert_eq!(tick_interval_ms(10), 50);
        // Clamped at the floor
        assert_eq!(tick_interval_ms(12), 50);
    }
}
