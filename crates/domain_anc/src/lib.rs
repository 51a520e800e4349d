//! Antenatal-care domain
//!
//! Owns the `Mother` case record and the orchestration of antenatal
//! submissions: registration, care visits and case closure. Collaborators
//! sit behind port traits in [`ports`]; the service in [`service`] wires
//! the guard-then-fan-out flow between them.

pub mod error;
pub mod mother;
pub mod ports;
pub mod service;

pub use error::AncError;
pub use mother::Mother;
pub use service::AncService;
