//! Entry view handler

use axum::{
    extract::{Query, State},
    Json,
};

use core_kernel::GroupId;
use domain_registration::{ParticipantForm, RecordStorePort};

use crate::dto::entry::{EntryQuery, EntryResponse};
use crate::{error::ApiError, AppState};

const MISSING_GROUP_MESSAGE: &str = "Lien invalide : le paramètre group_id est requis.";

/// Resolves the context of an embedded registration link
///
/// The group name comes from the link when present, otherwise from the
/// group page in the record store.
pub async fn entry_context(
    State(state): State<AppState>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<EntryResponse>, ApiError> {
    let group_id = query
        .group_id
        .as_deref()
        .and_then(GroupId::parse)
        .ok_or_else(|| ApiError::BadRequest(MISSING_GROUP_MESSAGE.to_string()))?;

    let group_name = match query.group_name.filter(|n| !n.trim().is_empty()) {
        Some(name) => Some(name),
        None => state.service.store().fetch_group_title(&group_id).await,
    };
    let group_name_resolved = group_name.is_some();
    let submitted_by = query.submitted_by.unwrap_or_default();

    let form = ParticipantForm::new(
        group_id.as_str(),
        group_name.unwrap_or_default(),
        submitted_by.as_str(),
    );

    Ok(Json(EntryResponse {
        group_id: group_id.as_str().to_string(),
        group_name: form.group_name().to_string(),
        group_name_resolved,
        submitted_by,
        submit_label: form.submit_label(),
    }))
}
