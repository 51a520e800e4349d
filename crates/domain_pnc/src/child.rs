//! The child case record

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{AnmId, CaseId};
use form_model::{fields, FormError, FormSubmission};

/// The persistent case record of a child under postnatal care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub case_id: CaseId,
    pub anm_id: AnmId,
    pub thayi_card_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub details: HashMap<String, String>,
    pub is_closed: bool,
}

impl Child {
    /// Builds the case record from a `child_registration` submission.
    pub fn from_registration(submission: &FormSubmission) -> Result<Self, FormError> {
        Ok(Self {
            case_id: submission.entity_id.clone(),
            anm_id: submission.anm_id.clone(),
            thayi_card_number: submission
                .field(fields::THAYI_CARD_NUMBER)
                .map(str::to_string),
            date_of_birth: submission.date_field(fields::DATE_OF_BIRTH)?,
            details: HashMap::new(),
            is_closed: false,
        })
    }

    pub fn with_merged_details(mut self, details: &HashMap<String, String>) -> Self {
        self.details
            .extend(details.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn close(&mut self) {
        self.is_closed = true;
    }

    pub fn is_active(&self) -> bool {
        !self.is_closed
    }
}

/// Splits the space-separated immunization list a submission carries into
/// individual milestone names. An absent or blank field yields no names.
pub fn immunizations_given(submission: &FormSubmission) -> Vec<String> {
    submission
        .field(fields::IMMUNIZATIONS_GIVEN)
        .map(|list| list.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
