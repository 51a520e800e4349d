//! Report records and per-form field allow-lists
//!
//! A report record is a flat, append-only projection of a submission. Which
//! fields flow into it is governed entirely by the per-form-type allow-list:
//! extra submission fields never leak into reporting.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use core_kernel::CoreError;

use crate::fields::{self, forms};
use crate::submission::FormSubmission;

/// A flat string-keyed record handed to the reporting sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportData(BTreeMap<String, String>);

impl ReportData {
    /// Projects a submission through a field allow-list. Fields absent from
    /// the submission are omitted rather than written as empty values.
    pub fn from_submission(submission: &FormSubmission, allow_list: &[String]) -> Self {
        let fields = allow_list
            .iter()
            .filter_map(|name| {
                submission
                    .field(name)
                    .map(|value| (name.clone(), value.to_string()))
            })
            .collect();
        Self(fields)
    }

    pub fn from_map(map: HashMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Per-form-type report field allow-lists.
///
/// Loadable from a JSON document mapping form names to field-name lists, so
/// reporting scope can change without touching service code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportFieldsDefinition {
    forms: HashMap<String, Vec<String>>,
}

static EMPTY: Vec<String> = Vec::new();

/// Built-in allow-lists used when no definition file is configured.
static BUILTIN: Lazy<ReportFieldsDefinition> = Lazy::new(|| {
    let mut definition = ReportFieldsDefinition::default();
    definition.insert(
        forms::EC_REGISTRATION,
        &[
            fields::CURRENT_METHOD,
            fields::IS_HIGH_PRIORITY,
            fields::SUBMISSION_DATE,
        ],
    );
    definition.insert(
        forms::FP_CHANGE,
        &[
            fields::CURRENT_METHOD,
            fields::NEW_METHOD,
            fields::FAMILY_PLANNING_METHOD_CHANGE_DATE,
            fields::SUBMISSION_DATE,
        ],
    );
    definition.insert(forms::ANC_REGISTRATION, &[fields::LMP_DATE, fields::SUBMISSION_DATE]);
    definition.insert(
        forms::ANC_VISIT,
        &[fields::VISIT_NUMBER, fields::VISIT_DATE, fields::SUBMISSION_DATE],
    );
    definition.insert(
        forms::ANC_OUTCOME,
        &[
            fields::PREGNANCY_OUTCOME,
            fields::DATE_OF_DELIVERY,
            fields::SUBMISSION_DATE,
        ],
    );
    definition.insert(
        forms::CHILD_REGISTRATION,
        &[fields::DATE_OF_BIRTH, fields::SUBMISSION_DATE],
    );
    definition.insert(
        forms::CHILD_IMMUNIZATION,
        &[
            fields::IMMUNIZATIONS_GIVEN,
            fields::IMMUNIZATION_DATE,
            fields::SUBMISSION_DATE,
        ],
    );
    definition
});

impl ReportFieldsDefinition {
    /// The compiled-in default definition.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|err| CoreError::configuration(format!("report fields definition: {err}")))
    }

    pub fn from_path(path: &str) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            CoreError::configuration(format!("report fields definition {path}: {err}"))
        })?;
        Self::from_json_str(&raw)
    }

    /// The ordered field allow-list for a form type. Unknown forms report
    /// nothing.
    pub fn get(&self, form_name: &str) -> &[String] {
        self.forms.get(form_name).unwrap_or(&EMPTY)
    }

    pub fn insert(&mut self, form_name: impl Into<String>, field_names: &[&str]) {
        self.forms.insert(
            form_name.into(),
            field_names.iter().map(|name| name.to_string()).collect(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_data_contains_only_allow_listed_fields() {
        let submission = FormSubmission::new(forms::EC_REGISTRATION, "e1", "a1")
            .with_field("someKey", "someValue")
            .with_field("unrelatedKey", "unrelatedValue");

        let report = ReportData::from_submission(&submission, &["someKey".to_string()]);

        assert_eq!(report.len(), 1);
        assert_eq!(report.get("someKey"), Some("someValue"));
        assert_eq!(report.get("unrelatedKey"), None);
    }

    #[test]
    fn test_absent_allow_listed_fields_are_omitted() {
        let submission = FormSubmission::new(forms::EC_REGISTRATION, "e1", "a1");
        let report = ReportData::from_submission(&submission, &["someKey".to_string()]);
        assert!(report.is_empty());
    }

    #[test]
    fn test_definition_loads_from_json() {
        let definition = ReportFieldsDefinition::from_json_str(
            r#"{"ec_registration": ["currentMethod", "submissionDate"]}"#,
        )
        .unwrap();
        assert_eq!(
            definition.get(forms::EC_REGISTRATION),
            &["currentMethod".to_string(), "submissionDate".to_string()]
        );
        assert!(definition.get("unknown_form").is_empty());
    }

    #[test]
    fn test_malformed_definition_is_a_configuration_error() {
        let err = ReportFieldsDefinition::from_json_str("not json").unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn test_builtin_covers_reported_forms() {
        let definition = ReportFieldsDefinition::builtin();
        assert!(!definition.get(forms::EC_REGISTRATION).is_empty());
        assert!(!definition.get(forms::FP_CHANGE).is_empty());
        // renewals are schedule-only, never reported
        assert!(definition.get(forms::RENEW_FP_PRODUCT).is_empty());
    }
}
