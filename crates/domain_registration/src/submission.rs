//! Submission orchestration
//!
//! [`SubmissionService::submit`] validates a batch, writes one record per
//! participant in list order, pauses between writes according to the
//! pacing policy, and collects every per-item failure.
//!
//! # Outcome classification
//!
//! ```text
//! no failures      -> Success  (200)
//! no successes     -> Failed   (500, carries the last failure cause)
//! anything else    -> Partial  (207)
//! ```
//!
//! Failures never abort the run and nothing is rolled back: records created
//! before a failure stay in the store.

use std::fmt;
use std::sync::Arc;

use core_kernel::{OperationMetadata, SubmissionId};

use crate::error::ValidationError;
use crate::pacing::{FixedDelayPacing, PacingPolicy};
use crate::participant::SubmissionBatch;
use crate::ports::{RecordHandle, RecordStorePort};
use crate::validation::BatchValidator;

/// A participant whose record was created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRecord {
    /// Position in the batch
    pub index: usize,
    pub handle: RecordHandle,
}

/// A participant whose record could not be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Position in the batch
    pub index: usize,
    /// E-mail of the participant, for logs
    pub email: String,
    /// Error reported by the store
    pub cause: String,
}

/// How a run ended overall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Every record was created
    Success,
    /// Some records were created, some were not
    Partial,
    /// No record was created
    Failed,
}

impl OutcomeStatus {
    /// HTTP status code reported to the caller
    pub fn http_status(&self) -> u16 {
        match self {
            OutcomeStatus::Success => 200,
            OutcomeStatus::Partial => 207,
            OutcomeStatus::Failed => 500,
        }
    }
}

/// Summary returned to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub status: OutcomeStatus,
    /// True only when every record was created
    pub success: bool,
    /// Sentence shown to the person who submitted
    pub message: String,
    pub created: usize,
    pub failed: usize,
}

/// Full result of one run, including per-item failures
#[derive(Debug, Clone)]
pub struct SubmissionReport {
    pub submission_id: SubmissionId,
    pub total: usize,
    pub created: Vec<CreatedRecord>,
    pub failures: Vec<ItemFailure>,
}

impl SubmissionReport {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Cause of the last failure in batch order
    pub fn last_error(&self) -> Option<&str> {
        self.failures.last().map(|f| f.cause.as_str())
    }

    pub fn status(&self) -> OutcomeStatus {
        if self.failures.is_empty() {
            OutcomeStatus::Success
        } else if self.created.is_empty() {
            OutcomeStatus::Failed
        } else {
            OutcomeStatus::Partial
        }
    }

    /// Compresses the report into the caller-facing outcome
    pub fn outcome(&self) -> SubmissionOutcome {
        let created = self.created_count();
        let failed = self.failed_count();
        let status = self.status();

        let message = match status {
            OutcomeStatus::Success => {
                let plural = if created > 1 { "s" } else { "" };
                format!("{created} participant{plural} inscrit{plural} avec succès.")
            }
            OutcomeStatus::Failed => format!(
                "Erreur lors de l'inscription : {}",
                self.last_error().unwrap_or_default()
            ),
            OutcomeStatus::Partial => format!(
                "{created} sur {} participants inscrits. Certains ont échoué.",
                self.total
            ),
        };

        SubmissionOutcome {
            status,
            success: status == OutcomeStatus::Success,
            message,
            created,
            failed,
        }
    }
}

/// Writes validated batches to the record store
#[derive(Clone)]
pub struct SubmissionService {
    store: Arc<dyn RecordStorePort>,
    pacing: Arc<dyn PacingPolicy>,
}

impl fmt::Debug for SubmissionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionService")
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

impl SubmissionService {
    /// Creates a service with the default pacing policy
    pub fn new(store: Arc<dyn RecordStorePort>) -> Self {
        Self::with_pacing(store, Arc::new(FixedDelayPacing::default()))
    }

    /// Creates a service with a specific pacing policy
    pub fn with_pacing(store: Arc<dyn RecordStorePort>, pacing: Arc<dyn PacingPolicy>) -> Self {
        Self { store, pacing }
    }

    /// The record store writes go to
    pub fn store(&self) -> &Arc<dyn RecordStorePort> {
        &self.store
    }

    /// Validates and writes a batch
    ///
    /// # Errors
    ///
    /// Returns the validation error when the batch is refused; no record
    /// is written in that case. Per-item write failures are not errors;
    /// they are collected in the report.
    pub async fn submit(&self, batch: &SubmissionBatch) -> Result<SubmissionReport, ValidationError> {
        let validated = match BatchValidator::validate(batch) {
            Ok(validated) => validated,
            Err(e) => {
                tracing::info!(group_id = %batch.group_id, reason = %e, "Submission rejected");
                return Err(e);
            }
        };

        let submission_id = SubmissionId::new_v7();
        let total = validated.participants.len();
        let mut report = SubmissionReport {
            submission_id,
            total,
            created: Vec::with_capacity(total),
            failures: Vec::new(),
        };

        tracing::info!(
            %submission_id,
            group_id = %validated.group_id,
            participants = total,
            "Submitting registrations"
        );

        for (index, participant) in validated.participants.iter().enumerate() {
            if index > 0 {
                let wait = self.pacing.wait_before_next(index, total);
                if !wait.is_zero() {
                    tokio::time::sleep(wait).await;
                }
            }

            let mut metadata = OperationMetadata::with_correlation_id(submission_id.to_string())
                .with_context("index", index.to_string());
            if let Some(submitter) = validated.submitted_by {
                metadata = metadata.initiated_by(submitter);
            }

            match self
                .store
                .create_record(participant, &validated.group_id, validated.submitted_by, Some(metadata))
                .await
            {
                Ok(handle) => {
                    tracing::debug!(
                        %submission_id,
                        index,
                        record_id = handle.id.as_ref().map(|id| id.as_str()),
                        "Record created"
                    );
                    report.created.push(CreatedRecord { index, handle });
                }
                Err(e) => {
                    tracing::error!(
                        %submission_id,
                        index,
                        email = %participant.email,
                        error = %e,
                        transient = e.is_transient(),
                        "Record creation failed"
                    );
                    report.failures.push(ItemFailure {
                        index,
                        email: participant.email.clone(),
                        cause: e.detail(),
                    });
                }
            }
        }

        tracing::info!(
            %submission_id,
            created = report.created_count(),
            failed = report.failed_count(),
            "Submission finished"
        );

        Ok(report)
    }
}
