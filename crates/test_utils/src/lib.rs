//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! registration test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built participants and request bodies
//! - `builders`: Builder patterns for submission batches
//! - `assertions`: Custom assertion helpers for submission outcomes
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
