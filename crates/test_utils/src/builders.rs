//! Test Data Builders
//!
//! Builders for constructing submission payloads with sensible defaults.
//! Tests specify only the fields they care about; everything else comes
//! from the shared fixtures.

use std::collections::HashMap;

use core_kernel::{AnmId, CaseId};
use form_model::{ExtraData, FormSubmission};

use crate::fixtures::IdFixtures;

/// Builder for test form submissions
pub struct SubmissionBuilder {
    form_name: String,
    entity_id: CaseId,
    anm_id: AnmId,
    fields: HashMap<String, String>,
}

impl SubmissionBuilder {
    /// Creates a builder for the given form, targeting the default fixture
    /// case and ANM
    pub fn new(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            entity_id: IdFixtures::case_id(),
            anm_id: IdFixtures::anm_id(),
            fields: HashMap::new(),
        }
    }

    /// Sets the subject case identifier
    pub fn for_case(mut self, entity_id: impl Into<CaseId>) -> Self {
        self.entity_id = entity_id.into();
        self
    }

    /// Sets the submitting ANM
    pub fn by_anm(mut self, anm_id: impl Into<AnmId>) -> Self {
        self.anm_id = anm_id.into();
        self
    }

    /// Adds a form field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Builds the submission
    pub fn build(self) -> FormSubmission {
        let mut submission =
            FormSubmission::new(self.form_name, self.entity_id, self.anm_id);
        for (name, value) in self.fields {
            submission = submission.with_field(name, value);
        }
        submission
    }
}

/// Builder for the auxiliary details/reporting payload
#[derive(Default)]
pub struct ExtraDataBuilder {
    details: HashMap<String, String>,
    reporting: Option<HashMap<String, String>>,
}

impl ExtraDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key to the details sub-map
    pub fn with_detail(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(name.into(), value.into());
        self
    }

    /// Adds a key to the reporting sub-map, creating it if absent
    pub fn with_reporting(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.reporting
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> ExtraData {
        let extra = ExtraData::with_details(self.details);
        match self.reporting {
            Some(reporting) => extra.and_reporting(reporting),
            None => extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_model::fields::forms;

    #[test]
    fn test_submission_builder_defaults() {
        let submission = SubmissionBuilder::new(forms::FP_CHANGE)
            .with_field("someKey", "someValue")
            .build();

        assert_eq!(submission.form_name, forms::FP_CHANGE);
        assert_eq!(submission.entity_id, IdFixtures::case_id());
        assert_eq!(submission.field("someKey"), Some("someValue"));
    }

    #[test]
    fn test_extra_data_builder_omits_reporting_by_default() {
        let extra = ExtraDataBuilder::new()
            .with_detail("currentMethod", "condom")
            .build();
        assert!(extra.reporting.is_none());

        let reported = ExtraDataBuilder::new()
            .with_reporting("currentMethod", "condom")
            .build();
        assert!(reported.reporting.is_some());
    }
}
