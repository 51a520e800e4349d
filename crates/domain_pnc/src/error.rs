//! Postnatal-care domain errors

use thiserror::Error;

use core_kernel::PortError;
use form_model::FormError;

/// Errors surfaced by the postnatal-care service. A missing case on a
/// guarded operation is the defined no-op branch, not an error.
#[derive(Debug, Error)]
pub enum PncError {
    #[error(transparent)]
    Malformed(#[from] FormError),

    #[error(transparent)]
    Collaborator(#[from] PortError),
}
