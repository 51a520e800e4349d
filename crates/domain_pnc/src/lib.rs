//! Postnatal-care domain
//!
//! Owns the `Child` case record and the orchestration of postnatal
//! submissions: registration, immunization updates and case closure.

pub mod child;
pub mod error;
pub mod ports;
pub mod service;

pub use child::Child;
pub use error::PncError;
pub use service::PncService;
