//! Core Kernel - Foundational types shared by the registration service
//!
//! This crate provides the building blocks used by the domain and API crates:
//! - Strongly-typed identifiers for groups, records, and submissions
//! - The port error taxonomy and adapter health types
//! - The core error type for configuration and validation failures

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{GroupId, RecordId, SubmissionId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
    OperationMetadata,
};
pub use error::CoreError;
