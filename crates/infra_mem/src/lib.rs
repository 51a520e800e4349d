//! In-Memory Infrastructure Layer
//!
//! Adapters backing the domain ports with process-local state. The case
//! repositories hold their records in `tokio::RwLock`-guarded maps and take
//! the write lock for the whole merge, so `update_details` is atomic per
//! call and same-case races resolve last-writer-wins. The reporting,
//! scheduling and action adapters append to in-memory logs and emit a
//! structured trace line per record.

pub mod actions;
pub mod repositories;
pub mod scheduling;
pub mod sinks;
pub mod tracking;

pub use actions::{ActionRecord, InMemoryActionStream};
pub use repositories::{InMemoryChildRepository, InMemoryCoupleRepository, InMemoryMotherRepository};
pub use scheduling::{InMemoryScheduleLog, ScheduleRecord};
pub use sinks::{InMemoryReportLog, ReportRecord};
pub use tracking::{InMemoryTrackingLog, TrackingRecord};
