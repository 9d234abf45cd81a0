//! Participant Registration Domain
//!
//! This crate registers event participants into an external record store.
//! An organizer submits a batch of participants for one group; each valid
//! participant becomes one record linked to the group's page.
//!
//! # Submission Flow
//!
//! - **Validation**: the whole batch is checked before anything is written
//! - **Sequential writes**: one record per participant, in list order
//! - **Pacing**: pauses between writes keep large batches under the
//!   store's rate limit
//! - **Aggregation**: per-item failures are collected, never fatal, and
//!   summarised as success, partial, or failure
//!
//! # Examples
//!
//! ```rust
//! use domain_registration::{ParticipantRecord, SubmissionBatch, BatchValidator};
//!
//! let batch = SubmissionBatch::new("grp-42", "Atelier Rust")
//!     .with_submitter("organizer@example.com")
//!     .with_participant(ParticipantRecord::new("Durand", "Alice", "alice@example.com", "Acme"));
//!
//! let validated = BatchValidator::validate(&batch).unwrap();
//! assert_eq!(validated.group_id.as_str(), "grp-42");
//! ```

pub mod participant;
pub mod validation;
pub mod error;
pub mod ports;
pub mod schema;
pub mod pacing;
pub mod submission;
pub mod form;
pub mod adapters;

pub use participant::{ParticipantRecord, ParticipantField, SubmissionBatch};
pub use validation::{BatchValidator, FieldIssue, RowErrors, ValidatedBatch};
pub use error::ValidationError;
pub use ports::{RecordStorePort, RecordHandle};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockRecordStore;
pub use schema::{RecordSchema, SchemaVersion};
pub use pacing::{PacingPolicy, FixedDelayPacing, NoPacing};
pub use submission::{
    SubmissionService, SubmissionReport, SubmissionOutcome, OutcomeStatus,
    CreatedRecord, ItemFailure,
};
pub use form::{ParticipantForm, FormRow, FormResult};
pub use adapters::{NotionConfig, NotionRecordStore};
