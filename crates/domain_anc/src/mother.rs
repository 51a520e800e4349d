//! The mother case record

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{AnmId, CaseId};
use form_model::{fields, FormError, FormSubmission};

/// The persistent case record of a mother under antenatal care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mother {
    pub case_id: CaseId,
    pub name: String,
    pub anm_id: AnmId,
    pub thayi_card_number: Option<String>,
    pub lmp_date: Option<NaiveDate>,
    pub registration_date: Option<NaiveDate>,
    #[serde(default)]
    pub details: HashMap<String, String>,
    pub is_closed: bool,
}

impl Mother {
    /// Builds the case record from an `anc_registration` submission. The
    /// mother's name is mandatory; everything else defaults to absent.
    pub fn from_registration(submission: &FormSubmission) -> Result<Self, FormError> {
        Ok(Self {
            case_id: submission.entity_id.clone(),
            name: submission.require(fields::WIFE_NAME)?.to_string(),
            anm_id: submission.anm_id.clone(),
            thayi_card_number: submission
                .field(fields::THAYI_CARD_NUMBER)
                .map(str::to_string),
            lmp_date: submission.date_field(fields::LMP_DATE)?,
            registration_date: submission.date_field(fields::REGISTRATION_DATE)?,
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
