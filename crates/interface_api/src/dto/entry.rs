//! Entry view DTOs

use serde::{Deserialize, Serialize};

/// Query string of the embedded link
#[derive(Debug, Default, Deserialize)]
pub struct EntryQuery {
    pub group_id: Option<String>,
    pub group_name: Option<String>,
    pub submitted_by: Option<String>,
}

/// Context the form needs to render
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub group_id: String,
    /// Empty when neither the link nor the store provided one
    pub group_name: String,
    /// False when the name could not be found
    pub group_name_resolved: bool,
    pub submitted_by: String,
    pub submit_label: String,
}
