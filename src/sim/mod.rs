//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per `advance` call, no wall clock
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod grid;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::choose_direction;
pub use grid::{Cell, Direction, Grid};
pub use state::{Dog, EndReason, Entities, GameSession, Occupancy, Snake, TunaCan};
pub use tick::{GameEvent, Snapshot, TickResult, advance};
