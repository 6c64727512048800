//! Loop driver for blockfall.
//!
//! Sits between a presentation layer and [`blockfall_core::GameState`]: it owns
//! the drop timer, pauses it during a soft drop, and stops it on game over.
//! Time is injected, so the driver never reads a clock itself.

pub mod driver;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use driver::{Driver, DriverSnapshot, DriverState};
