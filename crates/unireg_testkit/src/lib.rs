//! # UniReg Testkit
//!
//! Test utilities for UniReg.
//!
//! This crate provides:
//! - Temporary data directories and populated registries
//! - Property-based test generators using proptest
//! - Random registry operation sequences for invariant checks
//!
//! ## Usage
//!
//! ```rust
//! use unireg_testkit::prelude::*;
//!
//! with_temp_store(|store| {
//!     let uni = populated_university();
//!     store.save(&uni).unwrap();
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
