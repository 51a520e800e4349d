//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_anc::AncError;
use domain_ec::EcError;
use domain_pnc::PncError;
use form_model::FormError;

/// API error types
///
/// A guard no-op is not represented here: skipped submissions are a
/// successful response, not an error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unknown form type: {0}")]
    UnknownFormType(String),

    #[error("Malformed submission: {0}")]
    Malformed(#[from] FormError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream collaborator failed: {0}")]
    Collaborator(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::UnknownFormType(_) => (StatusCode::BAD_REQUEST, "unknown_form_type"),
            ApiError::Malformed(_) => (StatusCode::UNPROCESSABLE_ENTITY, "malformed_submission"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Collaborator(_) => (StatusCode::BAD_GATEWAY, "collaborator_failure"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EcError> for ApiError {
    fn from(err: EcError) -> Self {
        match err {
            EcError::CoupleNotRegistered(_) => ApiError::Conflict(err.to_string()),
            EcError::Malformed(form_err) => ApiError::Malformed(form_err),
            EcError::Collaborator(port_err) => ApiError::Collaborator(port_err.to_string()),
        }
    }
}

impl From<AncError> for ApiError {
    fn from(err: AncError) -> Self {
        match err {
            AncError::Malformed(form_err) => ApiError::Malformed(form_err),
            AncError::Collaborator(port_err) => ApiError::Collaborator(port_err.to_string()),
        }
    }
}

impl From<PncError> for ApiError {
    fn from(err: PncError) -> Self {
        match err {
            PncError::Malformed(form_err) => ApiError::Malformed(form_err),
            PncError::Collaborator(port_err) => ApiError::Collaborator(port_err.to_string()),
        }
    }
}
