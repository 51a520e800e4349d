//! Eligible-couple domain errors

use thiserror::Error;

use core_kernel::{CaseId, PortError};
use form_model::FormError;

/// Errors surfaced by the eligible-couple service.
///
/// A missing case on a guarded operation is NOT an error: it is the defined
/// no-op branch, reported as `Outcome::SkippedMissingCase`. The only
/// absence that fails is a registration submission for a couple the
/// out-of-band enrollment flow never created.
#[derive(Debug, Error)]
pub enum EcError {
    #[error("eligible couple {0} has no pre-created case record")]
    CoupleNotRegistered(CaseId),

    #[error(transparent)]
    Malformed(#[from] FormError),

    #[error(transparent)]
    Collaborator(#[from] PortError),
}
