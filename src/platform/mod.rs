//! Platform abstraction layer
//!
//! Glue between the engine and whatever hosts it:
//! - Input events mapped to game intents
//! - Fixed-step tick scheduling from frame or timer callbacks

pub mod driver;
pub mod input;

pub use driver::TickDriver;
pub use input::Intent;
