//! Form Model - the ingress boundary of the case system
//!
//! A raw form submission is an untyped bag of named string fields. This
//! crate keeps that untyped map at the true ingress boundary only: typed
//! accessors and extracted request structs convert it into validated values
//! as early as possible, so the business services never touch raw strings
//! for dates, counts or flags.
//!
//! # Modules
//!
//! - `submission`: the raw `FormSubmission` and its typed field accessors
//! - `fields`: the stable protocol field and form-name tags
//! - `requests`: typed extracted requests consumed by the business services
//! - `report`: allow-list-filtered report records and their definitions
//! - `error`: malformed-submission errors

pub mod error;
pub mod fields;
pub mod report;
pub mod requests;
pub mod submission;

pub use error::FormError;
pub use report::{ReportData, ReportFieldsDefinition};
pub use requests::{
    CaseCloseRequest, ExtraData, FamilyPlanningUpdateRequest, OutOfAreaRegistrationRequest,
};
pub use submission::FormSubmission;
