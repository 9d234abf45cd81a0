//! Participants and submission batches
//!
//! A [`ParticipantRecord`] is one form row. A [`SubmissionBatch`] is what a
//! single submit action sends: a group, the optional organizer e-mail, and
//! the rows in display order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One person registering for a group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    /// Family name, stored as the remote record title
    #[serde(rename = "nom")]
    pub last_name: String,
    /// Given name
    #[serde(rename = "prenom")]
    pub first_name: String,
    /// Contact e-mail
    pub email: String,
    /// Employer or organization
    #[serde(rename = "entreprise")]
    pub company: String,
}

impl ParticipantRecord {
    /// Creates a participant from its four fields
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            email: email.into(),
            company: company.into(),
        }
    }

    /// Returns the raw value of a field
    pub fn field(&self, field: ParticipantField) -> &str {
        match field {
            ParticipantField::LastName => &self.last_name,
            ParticipantField::FirstName => &self.first_name,
            ParticipantField::Email => &self.email,
            ParticipantField::Company => &self.company,
        }
    }

    /// Returns a mutable reference to a field
    pub fn field_mut(&mut self, field: ParticipantField) -> &mut String {
        match field {
            ParticipantField::LastName => &mut self.last_name,
            ParticipantField::FirstName => &mut self.first_name,
            ParticipantField::Email => &mut self.email,
            ParticipantField::Company => &mut self.company,
        }
    }

    /// Trims every field and lower-cases the e-mail
    pub fn normalized(&self) -> Self {
        Self {
            last_name: self.last_name.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            company: self.company.trim().to_string(),
        }
    }

    /// True when every field is blank
    pub fn is_blank(&self) -> bool {
        ParticipantField::ALL
            .iter()
            .all(|f| self.field(*f).trim().is_empty())
    }
}

/// The four fields of a participant, in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantField {
    #[serde(rename = "nom")]
    LastName,
    #[serde(rename = "prenom")]
    FirstName,
    Email,
    #[serde(rename = "entreprise")]
    Company,
}

impl ParticipantField {
    /// Every field, in the order validation visits them
    pub const ALL: [ParticipantField; 4] = [
        ParticipantField::LastName,
        ParticipantField::FirstName,
        ParticipantField::Email,
        ParticipantField::Company,
    ];

    /// Wire name of the field
    pub fn wire_name(&self) -> &'static str {
        match self {
            ParticipantField::LastName => "nom",
            ParticipantField::FirstName => "prenom",
            ParticipantField::Email => "email",
            ParticipantField::Company => "entreprise",
        }
    }
}

impl fmt::Display for ParticipantField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Everything one submit action sends to the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionBatch {
    /// Remote identifier of the group
    pub group_id: String,
    /// Display name of the group
    pub group_name: String,
    /// E-mail of whoever filled the form, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    /// Rows in display order
    pub participants: Vec<ParticipantRecord>,
}

impl SubmissionBatch {
    /// Creates a batch for a group
    pub fn new(group_id: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            group_name: group_name.into(),
            submitted_by: None,
            participants: Vec::new(),
        }
    }

    /// Sets the submitter e-mail
    pub fn with_submitter(mut self, email: impl Into<String>) -> Self {
        self.submitted_by = Some(email.into());
        self
    }

    /// Appends a participant
    pub fn with_participant(mut self, participant: ParticipantRecord) -> Self {
        self.participants.push(participant);
        self
    }

    /// Submitter e-mail, treating blank as absent
    pub fn submitter(&self) -> Option<&str> {
        self.submitted_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Number of participants
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// True when no participant was provided
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
