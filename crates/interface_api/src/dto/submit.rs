//! Submission DTOs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use domain_registration::{ParticipantRecord, SubmissionBatch, SubmissionOutcome};

/// One participant as sent by the form
///
/// Absent, null, or non-string fields read as blank, so they surface as
/// validation errors rather than unreadable bodies.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParticipantPayload {
    #[serde(deserialize_with = "string_or_blank")]
    pub nom: String,
    #[serde(deserialize_with = "string_or_blank")]
    pub prenom: String,
    #[serde(deserialize_with = "string_or_blank")]
    pub email: String,
    #[serde(deserialize_with = "string_or_blank")]
    pub entreprise: String,
}

impl ParticipantPayload {
    fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Submission body; values of the wrong type read as absent
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(deserialize_with = "string_or_none")]
    pub group_id: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub group_name: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub submitted_by: Option<String>,
    #[serde(deserialize_with = "list_or_none")]
    pub participants: Option<Vec<ParticipantPayload>>,
}

fn string_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn string_or_blank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    string_or_none(deserializer).map(Option::unwrap_or_default)
}

fn list_or_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<ParticipantPayload>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().map(ParticipantPayload::from_value).collect()),
        _ => None,
    })
}

impl From<SubmitRequest> for SubmissionBatch {
    fn from(request: SubmitRequest) -> Self {
        SubmissionBatch {
            group_id: request.group_id.unwrap_or_default(),
            group_name: request.group_name.unwrap_or_default(),
            submitted_by: request.submitted_by,
            participants: request
                .participants
                .unwrap_or_default()
                .into_iter()
                .map(|p| ParticipantRecord::new(p.nom, p.prenom, p.email, p.entreprise))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub created: usize,
    pub failed: usize,
}

impl From<SubmissionOutcome> for SubmitResponse {
    fn from(outcome: SubmissionOutcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            created: outcome.created,
            failed: outcome.failed,
        }
    }
}
