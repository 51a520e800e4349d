//! Raw form submissions and typed field access

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{AnmId, CaseId};

use crate::error::FormError;

/// A raw form submission as delivered by an external form system.
///
/// An opaque bag of named string fields plus three always-present metadata
/// fields: the case identifier the submission refers to, the submitting
/// ANM, and the form-name tag that selects the handling operation. The
/// referenced case may or may not exist at processing time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub form_name: String,
    pub entity_id: CaseId,
    pub anm_id: AnmId,
    #[serde(default)]
    pub form_fields: HashMap<String, String>,
}

impl FormSubmission {
    pub fn new(
        form_name: impl Into<String>,
        entity_id: impl Into<CaseId>,
        anm_id: impl Into<AnmId>,
    ) -> Self {
        Self {
            form_name: form_name.into(),
            entity_id: entity_id.into(),
            anm_id: anm_id.into(),
            form_fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form_fields.insert(name.into(), value.into());
        self
    }

    /// Returns the raw field value. Empty strings count as absent: form
    /// systems submit `""` for untouched inputs.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form_fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns the field value or an empty string.
    pub fn field_or_default(&self, name: &str) -> String {
        self.field(name).unwrap_or_default().to_string()
    }

    /// Returns the field value, failing if it is absent.
    pub fn require(&self, name: &str) -> Result<&str, FormError> {
        self.field(name)
            .ok_or_else(|| FormError::missing(&self.form_name, name))
    }

    /// Parses an optional ISO-8601 date field. Absent or empty is `None`.
    pub fn date_field(&self, name: &str) -> Result<Option<NaiveDate>, FormError> {
        self.field(name)
            .map(|value| {
                value
                    .parse::<NaiveDate>()
                    .map_err(|_| FormError::unparseable(&self.form_name, name, value))
            })
            .transpose()
    }

    /// Parses a mandatory ISO-8601 date field.
    pub fn require_date(&self, name: &str) -> Result<NaiveDate, FormError> {
        self.date_field(name)?
            .ok_or_else(|| FormError::missing(&self.form_name, name))
    }

    /// Parses an optional non-negative count field. Absent or empty is `None`.
    pub fn count_field(&self, name: &str) -> Result<Option<u32>, FormError> {
        self.field(name)
            .map(|value| {
                value
                    .parse::<u32>()
                    .map_err(|_| FormError::unparseable(&self.form_name, name, value))
            })
            .transpose()
    }

    /// Parses a yes/no flag field. Absent counts as `false`.
    pub fn flag_field(&self, name: &str) -> bool {
        matches!(
            self.field(name).map(str::to_ascii_lowercase).as_deref(),
            Some("yes") | Some("true") | Some("1")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    fn submission() -> FormSubmission {
        FormSubmission::new(fields::forms::EC_REGISTRATION, "entity id 1", "ANM X")
            .with_field(fields::CURRENT_METHOD, "ocp")
            .with_field(fields::SUBMISSION_DATE, "2011-01-01")
            .with_field(fields::NUMBER_OF_OCP_DELIVERED, "2")
            .with_field(fields::IS_HIGH_PRIORITY, "yes")
            .with_field(fields::OCP_REFILL_DATE, "")
    }

    #[test]
    fn test_empty_string_counts_as_absent() {
        let submission = submission();
        assert_eq!(submission.field(fields::OCP_REFILL_DATE), None);
        assert_eq!(submission.date_field(fields::OCP_REFILL_DATE).unwrap(), None);
    }

    #[test]
    fn test_typed_accessors() {
        let submission = submission();
        assert_eq!(submission.field(fields::CURRENT_METHOD), Some("ocp"));
        assert_eq!(
            submission.date_field(fields::SUBMISSION_DATE).unwrap(),
            Some(NaiveDate::from_ymd_opt(2011, 1, 1).unwrap())
        );
        assert_eq!(
            submission.count_field(fields::NUMBER_OF_OCP_DELIVERED).unwrap(),
            Some(2)
        );
        assert!(submission.flag_field(fields::IS_HIGH_PRIORITY));
        assert!(!submission.flag_field("someMissingFlag"));
    }

    #[test]
    fn test_unparseable_date_is_malformed() {
        let submission = FormSubmission::new("fp_change", "e1", "a1")
            .with_field(fields::SUBMISSION_DATE, "not a date");
        let err = submission.date_field(fields::SUBMISSION_DATE).unwrap_err();
        assert!(matches!(err, FormError::UnparseableField { .. }));
    }

    #[test]
    fn test_require_missing_field() {
        let submission = FormSubmission::new("fp_change", "e1", "a1");
        let err = submission.require(fields::CURRENT_METHOD).unwrap_err();
        assert!(matches!(err, FormError::MissingMandatoryField { .. }));
    }

    #[test]
    fn test_deserializes_from_wire_json() {
        let submission: FormSubmission = serde_json::from_str(
            r#"{
                "formName": "ec_registration",
                "entityId": "entity id 1",
                "anmId": "ANM X",
                "formFields": {"currentMethod": "condom"}
            }"#,
        )
        .unwrap();
        assert_eq!(submission.form_name, "ec_registration");
        assert_eq!(submission.entity_id, CaseId::new("entity id 1"));
        assert_eq!(submission.field(fields::CURRENT_METHOD), Some("condom"));
    }
}
