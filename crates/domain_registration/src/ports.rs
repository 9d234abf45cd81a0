//! Registration Domain Ports
//!
//! This module defines the port the registration domain needs from the
//! external record store. The production adapter talks to a Notion database;
//! the mock adapter keeps records in memory for tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_registration::ports::RecordStorePort;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn RecordStorePort> = Arc::new(NotionRecordStore::new(config)?);
//! let title = store.fetch_group_title(&group_id).await;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, GroupId, HealthCheckable, OperationMetadata, PortError, RecordId};

use crate::participant::ParticipantRecord;

/// Handle on a record the store accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHandle {
    /// Identifier assigned by the store, when its answer carried one
    pub id: Option<RecordId>,
    /// Link to the record, when the store provides one
    pub url: Option<String>,
}

/// The port trait for the external record store
///
/// Writes are append-only: the domain never updates or deletes a record.
#[async_trait]
pub trait RecordStorePort: DomainPort + HealthCheckable {
    /// Creates one record for a participant
    ///
    /// # Arguments
    ///
    /// * `participant` - The validated participant
    /// * `group_id` - Group the record is related to
    /// * `submitted_by` - Organizer e-mail, when provided
    /// * `metadata` - Correlation data for logs
    ///
    /// # Returns
    ///
    /// A handle on the created record. A failure is final for this
    /// participant; adapters must not retry.
    async fn create_record(
        &self,
        participant: &ParticipantRecord,
        group_id: &GroupId,
        submitted_by: Option<&str>,
        metadata: Option<OperationMetadata>,
    ) -> Result<RecordHandle, PortError>;

    /// Looks up the display title of a group
    ///
    /// Best effort: `None` when the group is unknown, the store is
    /// unreachable, the response is malformed, or the title is empty.
    async fn fetch_group_title(&self, group_id: &GroupId) -> Option<String>;
}

/// Mock implementation of RecordStorePort for testing
///
/// Records are kept in memory. Individual writes can be scripted to fail
/// by e-mail or by call position.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// A record held by the mock store
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct StoredRecord {
        pub id: RecordId,
        pub participant: ParticipantRecord,
        pub group_id: GroupId,
        pub submitted_by: Option<String>,
        pub correlation_id: Option<String>,
    }

    /// In-memory mock implementation of RecordStorePort
    #[derive(Debug, Default)]
    pub struct MockRecordStore {
        records: Arc<RwLock<Vec<StoredRecord>>>,
        titles: Arc<RwLock<HashMap<String, String>>>,
        failing_emails: HashSet<String>,
        failing_calls: HashSet<usize>,
        fail_all: bool,
        failure_message: Option<String>,
        unhealthy: bool,
        calls: AtomicUsize,
    }

    impl MockRecordStore {
        /// Creates a mock store that accepts every write
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes writes for this e-mail fail
        pub fn fail_for_email(mut self, email: impl Into<String>) -> Self {
            self.failing_emails.insert(email.into());
            self
        }

        /// Makes the n-th write (zero-based) fail
        pub fn fail_on_call(mut self, call: usize) -> Self {
            self.failing_calls.insert(call);
            self
        }

        /// Makes every write fail
        pub fn fail_always(mut self) -> Self {
            self.fail_all = true;
            self
        }

        /// Sets the message carried by scripted failures
        pub fn with_failure_message(mut self, message: impl Into<String>) -> Self {
            self.failure_message = Some(message.into());
            self
        }

        /// Registers a group title
        pub async fn with_title(self, group_id: impl Into<String>, title: impl Into<String>) -> Self {
            self.titles.write().await.insert(group_id.into(), title.into());
            self
        }

        /// Reports the store as unhealthy
        pub fn unhealthy(mut self) -> Self {
            self.unhealthy = true;
            self
        }

        /// Records written so far, in write order
        pub async fn records(&self) -> Vec<StoredRecord> {
            self.records.read().await.clone()
        }

        /// Number of create calls received, failed ones included
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockRecordStore {}

    #[async_trait]
    impl HealthCheckable for MockRecordStore {
        async fn health_check(&self) -> HealthCheckResult {
            let (status, message) = if self.unhealthy {
                (AdapterHealth::Unhealthy, "Mock store marked unhealthy")
            } else {
                (AdapterHealth::Healthy, "Mock store always healthy")
            };
            HealthCheckResult {
                adapter_id: "mock-record-store".to_string(),
                status,
                latency_ms: 0,
                message: Some(message.to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl RecordStorePort for MockRecordStore {
        async fn create_record(
            &self,
            participant: &ParticipantRecord,
            group_id: &GroupId,
            submitted_by: Option<&str>,
            metadata: Option<OperationMetadata>,
        ) -> Result<RecordHandle, PortError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);

            if self.fail_all
                || self.failing_calls.contains(&call)
                || self.failing_emails.contains(&participant.email)
            {
                let message = self
                    .failure_message
                    .clone()
                    .unwrap_or_else(|| format!("write rejected for {}", participant.email));
                return Err(PortError::validation(message));
            }

            let id = RecordId::new(uuid::Uuid::now_v7().to_string());
            self.records.write().await.push(StoredRecord {
                id: id.clone(),
                participant: participant.clone(),
                group_id: group_id.clone(),
                submitted_by: submitted_by.map(str::to_string),
                correlation_id: metadata.and_then(|m| m.correlation_id),
            });

            Ok(RecordHandle { id: Some(id), url: None })
        }

        async fn fetch_group_title(&self, group_id: &GroupId) -> Option<String> {
            self.titles
                .read()
                .await
                .get(group_id.as_str())
                .filter(|t| !t.is_empty())
                .cloned()
        }
    }
}
