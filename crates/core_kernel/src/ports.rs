//! Ports infrastructure
//!
//! Every domain talks to its collaborators (case repository, reporting sink,
//! scheduler, action service) through port traits defined in that domain's
//! crate. This module provides the pieces those traits share: the unified
//! `PortError` all implementations return, and the identifier generator port
//! used when a case must be minted locally.
//!
//! ```rust,ignore
//! // In domain_ec/src/ports.rs
//! #[async_trait]
//! pub trait EligibleCoupleRepository: Send + Sync {
//!     async fn find_by_case_id(&self, id: &CaseId) -> Result<Option<EligibleCouple>, PortError>;
//!     async fn register(&self, couple: EligibleCouple) -> Result<(), PortError>;
//! }
//! ```

use thiserror::Error;
use uuid::Uuid;

/// Error type for port operations
///
/// A unified error type that all port implementations return, so a business
/// service propagates collaborator failures without caring whether the
/// adapter behind the trait is in-memory, a database, or a remote service.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal error occurred in the adapter
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Port for minting fresh case identifiers
///
/// Used when a subject was registered elsewhere (out-of-area) and the
/// submission therefore carries no locally meaningful identifier. The
/// generated identifier is never derived from submission content.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> Uuid;
}

/// Production identifier generator backed by random UUIDs
#[derive(Debug, Default, Clone)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic generator for tests: hands out a pre-seeded sequence.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct FixedIdGenerator {
        ids: Mutex<Vec<Uuid>>,
    }

    impl FixedIdGenerator {
        pub fn returning(ids: Vec<Uuid>) -> Self {
            let mut ids = ids;
            ids.reverse();
            Self {
                ids: Mutex::new(ids),
            }
        }
    }

    impl IdGenerator for FixedIdGenerator {
        fn generate_id(&self) -> Uuid {
            self.ids
                .lock()
                .expect("id generator mutex poisoned")
                .pop()
                .expect("FixedIdGenerator exhausted")
        }
    }
}
