//! In-memory case repositories
//!
//! One adapter per domain, all following the same shape: a
//! `RwLock<HashMap<CaseId, Entity>>`, reads under the read lock, every
//! mutation under the write lock for its whole duration.

pub mod children;
pub mod couples;
pub mod mothers;

pub use children::InMemoryChildRepository;
pub use couples::InMemoryCoupleRepository;
pub use mothers::InMemoryMotherRepository;
