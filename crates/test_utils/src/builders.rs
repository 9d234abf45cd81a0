//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant parts and keep defaults for the rest.

use domain_registration::{ParticipantRecord, SubmissionBatch};

use crate::fixtures::{GroupFixtures, ParticipantFixtures};

/// Builder for submission batches
pub struct TestBatchBuilder {
    group_id: String,
    group_name: String,
    submitted_by: Option<String>,
    participants: Vec<ParticipantRecord>,
}

impl Default for TestBatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBatchBuilder {
    /// Creates a builder for the fixture group, with no participants
    pub fn new() -> Self {
        Self {
            group_id: GroupFixtures::group_id().to_string(),
            group_name: GroupFixtures::group_name().to_string(),
            submitted_by: Some(GroupFixtures::organizer().to_string()),
            participants: Vec::new(),
        }
    }

    /// Sets the group ID
    pub fn with_group_id(mut self, id: impl Into<String>) -> Self {
        self.group_id = id.into();
        self
    }

    /// Removes the submitter
    pub fn without_submitter(mut self) -> Self {
        self.submitted_by = None;
        self
    }

    /// Adds a participant
    pub fn with_participant(mut self, participant: ParticipantRecord) -> Self {
        self.participants.push(participant);
        self
    }

    /// Adds `count` numbered valid participants
    pub fn with_participants(mut self, count: usize) -> Self {
        let start = self.participants.len();
        self.participants
            .extend((start..start + count).map(ParticipantFixtures::numbered));
        self
    }

    /// Builds the batch
    pub fn build(self) -> SubmissionBatch {
        SubmissionBatch {
            group_id: self.group_id,
            group_name: self.group_name,
            submitted_by: self.submitted_by,
            participants: self.participants,
        }
    }
}
