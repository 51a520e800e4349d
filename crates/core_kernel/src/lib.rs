//! Core Kernel - Foundational types for the frontline health case system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed case and health-worker identifiers
//! - The unified port error type for collaborator interfaces
//! - The identifier generator port
//! - The existence-guard helper shared by every business service

pub mod identifiers;
pub mod error;
pub mod location;
pub mod ports;
pub mod guard;

pub use identifiers::{AnmId, CaseId};
pub use error::CoreError;
pub use location::Location;
pub use ports::{IdGenerator, PortError, UuidGenerator};
pub use guard::Outcome;
