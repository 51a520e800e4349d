//! Malformed-submission errors
//!
//! Extraction prefers defaulting over failure: an absent optional field
//! becomes `None` or an empty string. These errors are raised only when a
//! field mandatory for the declared form type is missing with no safe
//! default, or when a present value cannot be parsed into its declared
//! shape.

use thiserror::Error;

/// Errors raised while turning a raw submission into a typed request
#[derive(Debug, Error)]
pub enum FormError {
    #[error("malformed {form} submission: missing mandatory field {field}")]
    MissingMandatoryField { form: String, field: String },

    #[error("malformed {form} submission: field {field} carries unparseable value {value:?}")]
    UnparseableField {
        form: String,
        field: String,
        value: String,
    },

    #[error("malformed submission: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

impl FormError {
    pub fn missing(form: impl Into<String>, field: impl Into<String>) -> Self {
        FormError::MissingMandatoryField {
            form: form.into(),
            field: field.into(),
        }
    }

    pub fn unparseable(
        form: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        FormError::UnparseableField {
            form: form.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}
