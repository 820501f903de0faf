//! CLI command implementations.

pub mod menu;
pub mod seed;
pub mod stats;
pub mod verify;
