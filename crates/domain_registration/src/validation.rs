//! Participant validation rules
//!
//! The same rules run twice: once in the form, to annotate rows for the
//! person typing, and once on the server, where they are authoritative.
//!
//! # Validation Rules
//!
//! - The group identifier must be present
//! - At least one participant must be provided
//! - Every field of every participant must be non-blank after trimming
//! - E-mails must match `^[^\s@]+@[^\s@]+\.[^\s@]+$`
//!
//! The server-side check stops at the first offending participant and
//! reports a single [`ValidationError`]. The form-side check reports every
//! problem of every row.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use core_kernel::GroupId;

use crate::error::ValidationError;
use crate::participant::{ParticipantField, ParticipantRecord, SubmissionBatch};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("e-mail pattern compiles")
});

/// Returns true when `email` has the `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// A problem with one field of one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    /// The field is blank
    Required,
    /// The e-mail is filled but malformed
    InvalidEmail,
}

impl FieldIssue {
    /// Short label displayed under the field
    pub fn label(&self) -> &'static str {
        match self {
            FieldIssue::Required => "Requis",
            FieldIssue::InvalidEmail => "E-mail invalide",
        }
    }
}

/// Per-field annotations for one row
pub type RowErrors = BTreeMap<ParticipantField, FieldIssue>;

/// A batch that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedBatch<'a> {
    /// The group every record will be related to
    pub group_id: GroupId,
    /// Submitter e-mail, when provided
    pub submitted_by: Option<&'a str>,
    /// The participants, unchanged
    pub participants: &'a [ParticipantRecord],
}

/// Validator for submission batches
pub struct BatchValidator;

impl BatchValidator {
    /// Validates a batch, stopping at the first problem
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, checking the group, then
    /// the participant count, then each participant in order.
    pub fn validate(batch: &SubmissionBatch) -> Result<ValidatedBatch<'_>, ValidationError> {
        let group_id = GroupId::parse(&batch.group_id).ok_or(ValidationError::MissingGroup)?;

        if batch.participants.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }

        for (index, participant) in batch.participants.iter().enumerate() {
            Self::validate_participant(index, participant)?;
        }

        Ok(ValidatedBatch {
            group_id,
            submitted_by: batch.submitter(),
            participants: &batch.participants,
        })
    }

    /// Validates one participant
    ///
    /// Blank fields are reported before a malformed e-mail.
    pub fn validate_participant(
        index: usize,
        participant: &ParticipantRecord,
    ) -> Result<(), ValidationError> {
        if let Some(field) = ParticipantField::ALL
            .into_iter()
            .find(|f| participant.field(*f).trim().is_empty())
        {
            return Err(ValidationError::MissingField { index, field });
        }

        if !is_valid_email(&participant.email) {
            return Err(ValidationError::InvalidEmail { index });
        }

        Ok(())
    }

    /// Annotates every row for display in the form
    ///
    /// Returns one entry per row, `None` when the row is clean.
    pub fn annotate(participants: &[ParticipantRecord]) -> Vec<Option<RowErrors>> {
        participants.iter().map(Self::annotate_row).collect()
    }

    fn annotate_row(participant: &ParticipantRecord) -> Option<RowErrors> {
        let mut errors = RowErrors::new();

        for field in ParticipantField::ALL {
            let value = participant.field(field);
            if value.trim().is_empty() {
                errors.insert(field, FieldIssue::Required);
            } else if field == ParticipantField::Email && !is_valid_email(value) {
                errors.insert(field, FieldIssue::InvalidEmail);
            }
        }

        if errors.is_empty() {
            None
        } else {
            Some(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_participant() -> ParticipantRecord {
        ParticipantRecord::new("Durand", "Alice", "alice@example.com", "Acme")
    }

    fn batch_of(participants: Vec<ParticipantRecord>) -> SubmissionBatch {
        SubmissionBatch {
            group_id: "grp-1".to_string(),
            group_name: "Atelier".to_string(),
            submitted_by: None,
            participants,
        }
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@@b.co"));
    }

    #[test]
    fn test_valid_batch() {
        let batch = batch_of(vec![valid_participant()]).with_submitter("org@example.com");
        let validated = BatchValidator::validate(&batch).unwrap();
        assert_eq!(validated.group_id.as_str(), "grp-1");
        assert_eq!(validated.submitted_by, Some("org@example.com"));
        assert_eq!(validated.participants.len(), 1);
    }

    #[test]
    fn test_missing_group() {
        let mut batch = batch_of(vec![valid_participant()]);
        batch.group_id = "  ".to_string();
        assert_eq!(BatchValidator::validate(&batch).unwrap_err(), ValidationError::MissingGroup);
    }

    #[test]
    fn test_missing_group_checked_before_empty_batch() {
        let batch = SubmissionBatch::default();
        assert_eq!(BatchValidator::validate(&batch).unwrap_err(), ValidationError::MissingGroup);
    }

    #[test]
    fn test_empty_batch() {
        let batch = batch_of(vec![]);
        assert_eq!(BatchValidator::validate(&batch).unwrap_err(), ValidationError::EmptyBatch);
    }

    #[test]
    fn test_first_blank_field_is_reported() {
        let mut participant = valid_participant();
        participant.first_name = " ".to_string();
        participant.company = String::new();
        let batch = batch_of(vec![valid_participant(), participant]);

        assert_eq!(
            BatchValidator::validate(&batch).unwrap_err(),
            ValidationError::MissingField {
                index: 1,
                field: ParticipantField::FirstName,
            }
        );
    }

    #[test]
    fn test_blank_field_wins_over_bad_email() {
        let mut participant = valid_participant();
        participant.email = "nope".to_string();
        participant.company = String::new();

        assert!(matches!(
            BatchValidator::validate_participant(0, &participant),
            Err(ValidationError::MissingField { field: ParticipantField::Company, .. })
        ));
    }

    #[test]
    fn test_stops_at_first_offending_participant() {
        let mut bad_email = valid_participant();
        bad_email.email = "a@b".to_string();
        let mut blank = valid_participant();
        blank.last_name = String::new();

        let batch = batch_of(vec![valid_participant(), bad_email, blank]);
        assert_eq!(
            BatchValidator::validate(&batch).unwrap_err(),
            ValidationError::InvalidEmail { index: 1 }
        );
    }

    #[test]
    fn test_annotate_reports_every_issue() {
        let mut row = ParticipantRecord::default();
        row.email = "bad".to_string();

        let annotations = BatchValidator::annotate(&[valid_participant(), row]);
        assert_eq!(annotations.len(), 2);
        assert!(annotations[0].is_none());

        let errors = annotations[1].as_ref().unwrap();
        assert_eq!(errors.get(&ParticipantField::LastName), Some(&FieldIssue::Required));
        assert_eq!(errors.get(&ParticipantField::FirstName), Some(&FieldIssue::Required));
        assert_eq!(errors.get(&ParticipantField::Company), Some(&FieldIssue::Required));
        assert_eq!(errors.get(&ParticipantField::Email), Some(&FieldIssue::InvalidEmail));
        assert_eq!(errors[&ParticipantField::Email].label(), "E-mail invalide");
    }

    #[test]
    fn test_annotate_blank_email_is_required_not_invalid() {
        let mut row = valid_participant();
        row.email = "   ".to_string();
        let annotations = BatchValidator::annotate(&[row]);
        let errors = annotations[0].as_ref().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&ParticipantField::Email].label(), "Requis");
    }
}
