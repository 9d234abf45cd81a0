//! Submission handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use domain_registration::SubmissionBatch;

use crate::dto::submit::{SubmitRequest, SubmitResponse};
use crate::{error::ApiError, AppState};

/// Registers a batch of participants
///
/// Answers 200 when every record was created, 207 when some were, and 500
/// when none were. A refused batch answers 400 before any write.
pub async fn submit_registrations(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Unreadable submission body");
        ApiError::Internal(rejection.body_text())
    })?;

    let batch = SubmissionBatch::from(request);
    let report = state.service.submit(&batch).await?;
    let outcome = report.outcome();

    let status = StatusCode::from_u16(outcome.status.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Ok((status, Json(SubmitResponse::from(outcome))))
}
