//! Remote record schema
//!
//! Maps participant fields to the property names of the target database.
//! Deployments have drifted: the first database names its relation
//! `📂 Groupe`, a later one uses `Groupe` and also stamps a submission date.
//! Each layout is a [`SchemaVersion`]; the active one comes from
//! configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CoreError, GroupId};

use crate::participant::ParticipantRecord;

/// Known database layouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Nested relation name, no date stamp
    #[default]
    V1,
    /// Flat relation name plus a submission date
    V2,
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V1 => f.write_str("v1"),
            SchemaVersion::V2 => f.write_str("v2"),
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(SchemaVersion::V1),
            "v2" | "2" => Ok(SchemaVersion::V2),
            other => Err(CoreError::configuration(format!(
                "unknown schema version '{other}' (expected v1 or v2)"
            ))),
        }
    }
}

/// Property names of the target database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub version: SchemaVersion,
    /// Title property, receives the last name
    pub last_name: String,
    /// Rich-text property for the first name
    pub first_name: String,
    /// E-mail property for the participant
    pub email: String,
    /// Rich-text property for the company
    pub company: String,
    /// Relation property pointing at the group page
    pub group_relation: String,
    /// E-mail property for the organizer
    pub submitted_by: String,
    /// Date property stamped at write time, if the layout has one
    pub submission_date: Option<String>,
}

impl RecordSchema {
    /// Returns the layout for a version
    pub fn for_version(version: SchemaVersion) -> Self {
        let base = Self {
            version,
            last_name: "Nom".to_string(),
            first_name: "Prénom".to_string(),
            email: "E-mail".to_string(),
            company: "Entreprise".to_string(),
            group_relation: "📂 Groupe".to_string(),
            submitted_by: "Soumis par".to_string(),
            submission_date: None,
        };

        match version {
            SchemaVersion::V1 => base,
            SchemaVersion::V2 => Self {
                group_relation: "Groupe".to_string(),
                submission_date: Some("Date de soumission".to_string()),
                ..base
            },
        }
    }

    /// Builds the `properties` object for one participant
    ///
    /// `today` is only used when the layout has a date property.
    pub fn properties(
        &self,
        participant: &ParticipantRecord,
        group_id: &GroupId,
        submitted_by: Option<&str>,
        today: NaiveDate,
    ) -> Value {
        let mut properties = Map::new();

        properties.insert(self.last_name.clone(), json!({ "title": rich_text(&participant.last_name) }));
        properties.insert(self.first_name.clone(), json!({ "rich_text": rich_text(&participant.first_name) }));
        properties.insert(self.email.clone(), json!({ "email": participant.email }));
        properties.insert(self.company.clone(), json!({ "rich_text": rich_text(&participant.company) }));
        properties.insert(
            self.group_relation.clone(),
            json!({ "relation": [{ "id": group_id.as_str() }] }),
        );

        if let Some(email) = submitted_by.filter(|e| !e.trim().is_empty()) {
            properties.insert(self.submitted_by.clone(), json!({ "email": email }));
        }

        if let Some(ref date_property) = self.submission_date {
            properties.insert(
                date_property.clone(),
                json!({ "date": { "start": today.format("%Y-%m-%d").to_string() } }),
            );
        }

        Value::Object(properties)
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::for_version(SchemaVersion::default())
    }
}

fn rich_text(content: &str) -> Value {
    json!([{ "text": { "content": content } }])
}
