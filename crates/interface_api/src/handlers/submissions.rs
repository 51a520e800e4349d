//! Form submission handler

use axum::{extract::State, Json};
use serde::Deserialize;

use form_model::{ExtraData, FormSubmission};

use crate::dispatch::DispatchOutcome;
use crate::error::ApiError;
use crate::AppState;

/// The wire shape of `POST /submissions`: submission envelope fields plus
/// the optional details/reporting payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingSubmission {
    #[serde(flatten)]
    pub submission: FormSubmission,
    #[serde(default)]
    pub extra_data: Option<ExtraData>,
}

/// Accepts one form submission and dispatches it.
///
/// A guard no-op is a 200 with `"skipped"` status: the submission was
/// well-formed, the case just is not tracked here.
pub async fn submit(
    State(state): State<AppState>,
    Json(incoming): Json<IncomingSubmission>,
) -> Result<Json<DispatchOutcome>, ApiError> {
    let extra_data = incoming.extra_data.unwrap_or_default();
    let outcome = state
        .dispatcher
        .handle(&incoming.submission, &extra_data)
        .await?;
    Ok(Json(outcome))
}
