//! Registration form state
//!
//! A headless model of the embedded form: the rows being edited, their
//! annotations, and the last result shown. Rendering belongs to the host
//! page; this type only decides what the form holds after each action.

use uuid::Uuid;

use crate::participant::{ParticipantField, ParticipantRecord, SubmissionBatch};
use crate::validation::{BatchValidator, RowErrors};

/// Message shown when the server could not be reached
pub const CONNECTION_ERROR_MESSAGE: &str = "Erreur de connexion. Veuillez réessayer.";

/// One editable row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    /// Stable key for rendering
    pub key: Uuid,
    pub participant: ParticipantRecord,
}

impl FormRow {
    fn empty() -> Self {
        Self {
            key: Uuid::new_v4(),
            participant: ParticipantRecord::default(),
        }
    }
}

/// Result banner shown under the rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormResult {
    pub success: bool,
    pub message: String,
}

/// State of the registration form for one group
#[derive(Debug, Clone)]
pub struct ParticipantForm {
    group_id: String,
    group_name: String,
    submitted_by: String,
    rows: Vec<FormRow>,
    errors: Vec<Option<RowErrors>>,
    result: Option<FormResult>,
    submitting: bool,
}

impl ParticipantForm {
    /// Opens the form with a single empty row
    pub fn new(
        group_id: impl Into<String>,
        group_name: impl Into<String>,
        submitted_by: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            group_name: group_name.into(),
            submitted_by: submitted_by.into(),
            rows: vec![FormRow::empty()],
            errors: Vec::new(),
            result: None,
            submitting: false,
        }
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    /// Annotations of a row, if the last validation flagged it
    pub fn row_errors(&self, index: usize) -> Option<&RowErrors> {
        self.errors.get(index).and_then(Option::as_ref)
    }

    pub fn result(&self) -> Option<&FormResult> {
        self.result.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Rows can be removed only while more than one is shown
    pub fn can_remove(&self) -> bool {
        self.rows.len() > 1
    }

    /// Label of the submit button
    pub fn submit_label(&self) -> String {
        if self.submitting {
            "Envoi en cours...".to_string()
        } else if self.rows.len() > 1 {
            format!("Soumettre les {} inscriptions", self.rows.len())
        } else {
            "Soumettre l'inscription".to_string()
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(FormRow::empty());
    }

    /// Removes a row; ignored for the last remaining row or a bad index
    pub fn remove_row(&mut self, index: usize) {
        if !self.can_remove() || index >= self.rows.len() {
            return;
        }
        self.rows.remove(index);
        if index < self.errors.len() {
            self.errors.remove(index);
        }
    }

    /// Updates one field, clearing its annotation and any shown result
    pub fn edit(&mut self, index: usize, field: ParticipantField, value: impl Into<String>) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        *row.participant.field_mut(field) = value.into();

        if let Some(Some(errors)) = self.errors.get_mut(index) {
            errors.remove(&field);
        }
        self.result = None;
    }

    /// Annotates every row and returns true when all are clean
    pub fn validate(&mut self) -> bool {
        let participants: Vec<ParticipantRecord> =
            self.rows.iter().map(|r| r.participant.clone()).collect();
        self.errors = BatchValidator::annotate(&participants);
        self.errors.iter().all(Option::is_none)
    }

    /// Validates and, when clean, builds the batch to send
    ///
    /// Fields are trimmed and e-mails lower-cased. Returns `None` and keeps
    /// the annotations when a row is invalid.
    pub fn prepare_submission(&mut self) -> Option<SubmissionBatch> {
        if self.submitting || !self.validate() {
            return None;
        }

        self.submitting = true;
        self.result = None;

        let submitted_by = Some(self.submitted_by.clone()).filter(|s| !s.is_empty());
        Some(SubmissionBatch {
            group_id: self.group_id.clone(),
            group_name: self.group_name.clone(),
            submitted_by,
            participants: self.rows.iter().map(|r| r.participant.normalized()).collect(),
        })
    }

    /// Shows the server's answer; a success resets the rows
    pub fn apply_response(&mut self, success: bool, message: impl Into<String>) {
        self.submitting = false;
        self.result = Some(FormResult {
            success,
            message: message.into(),
        });

        if success {
            self.rows = vec![FormRow::empty()];
            self.errors.clear();
        }
    }

    /// Shows the connection error; rows are kept for another attempt
    pub fn apply_transport_failure(&mut self) {
        self.apply_response(false, CONNECTION_ERROR_MESSAGE);
    }
}
