//! Eligible-Couple Domain
//!
//! The core business-rule engine of the system. `EcService` interprets
//! family-planning form submissions, applies conditional state transitions
//! to the couple's case record and fans out the correct subset of
//! reporting, scheduling and alerting side effects. Every mutating
//! operation is existence-guarded: when the target couple does not exist,
//! no collaborator is touched beyond the lookup itself.

pub mod couple;
pub mod error;
pub mod ports;
pub mod product;
pub mod service;

pub use couple::EligibleCouple;
pub use error::EcError;
pub use product::FpProductInformation;
pub use service::{EcService, FP_COMPLICATION_MILESTONE};
