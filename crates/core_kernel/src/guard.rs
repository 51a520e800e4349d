//! Existence-guard helper
//!
//! Every mutating operation in the business services follows the same shape:
//! check that the subject case exists, then fan out an ordered sequence of
//! independent side effects. When the case is missing the whole operation is
//! a defined no-op branch, not an error, and no collaborator may be touched
//! beyond the lookup itself. This module factors that branch out so the
//! eligible-couple, mother and child services all share one implementation.

use std::future::Future;

use crate::identifiers::CaseId;

/// Result of a guarded operation.
///
/// `SkippedMissingCase` is the observable form of the not-found guard:
/// callers (and tests) can distinguish "applied" from "subject absent"
/// without treating the latter as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The subject existed and the fan-out ran to completion.
    Applied,
    /// The subject was not found; no side effects were performed.
    SkippedMissingCase,
}

impl Outcome {
    pub fn was_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Runs `op` with the looked-up subject, or records the guard no-op.
///
/// The caller performs the lookup; this helper encodes the skip branch and
/// its logging so no service re-implements it.
pub async fn when_present<T, E, F, Fut>(
    entity_type: &'static str,
    case_id: &CaseId,
    subject: Option<T>,
    op: F,
) -> Result<Outcome, E>
where
    F: FnOnce(T) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    match subject {
        Some(subject) => {
            op(subject).await?;
            Ok(Outcome::Applied)
        }
        None => {
            tracing::warn!(entity_type, case_id = %case_id, "case not found, skipping submission");
            Ok(Outcome::SkippedMissingCase)
        }
    }
}

/// Boolean variant of [`when_present`] for operations that only need an
/// existence predicate rather than the full entity (case closure).
pub async fn when_exists<E, F, Fut>(
    entity_type: &'static str,
    case_id: &CaseId,
    exists: bool,
    op: F,
) -> Result<Outcome, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    if exists {
        op().await?;
        Ok(Outcome::Applied)
    } else {
        tracing::warn!(entity_type, case_id = %case_id, "case does not exist, skipping close");
        Ok(Outcome::SkippedMissingCase)
    }
}
