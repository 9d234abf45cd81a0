//! Registration domain errors
//!
//! Validation errors carry the exact sentence shown to the person filling the
//! form. Their `Display` output is what the API returns verbatim.

use thiserror::Error;

use crate::participant::ParticipantField;

/// Reasons a batch is refused before any remote write happens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The group identifier is absent or blank
    #[error("ID du groupe manquant.")]
    MissingGroup,

    /// No participant was provided
    #[error("Aucun participant fourni.")]
    EmptyBatch,

    /// A participant has a blank field (index is zero-based)
    #[error("Participant {} : tous les champs sont obligatoires.", .index + 1)]
    MissingField {
        index: usize,
        field: ParticipantField,
    },

    /// A participant e-mail does not look like `local@domain.tld`
    #[error("Participant {} : adresse e-mail invalide.", .index + 1)]
    InvalidEmail {
        index: usize,
    },
}

impl ValidationError {
    /// Zero-based index of the offending participant, if any
    pub fn participant_index(&self) -> Option<usize> {
        match self {
            ValidationError::MissingField { index, .. }
            | ValidationError::InvalidEmail { index } => Some(*index),
            ValidationError::MissingGroup | ValidationError::EmptyBatch => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_use_one_based_index() {
        let missing = ValidationError::MissingField {
            index: 0,
            field: ParticipantField::Company,
        };
        assert_eq!(
            missing.to_string(),
            "Participant 1 : tous les champs sont obligatoires."
        );

        let invalid = ValidationError::InvalidEmail { index: 2 };
        assert_eq!(invalid.to_string(), "Participant 3 : adresse e-mail invalide.");
    }

    #[test]
    fn test_batch_level_messages() {
        assert_eq!(ValidationError::MissingGroup.to_string(), "ID du groupe manquant.");
        assert_eq!(ValidationError::EmptyBatch.to_string(), "Aucun participant fourni.");
        assert_eq!(ValidationError::EmptyBatch.participant_index(), None);
    }
}
