//! Typed extracted requests
//!
//! Each request is a strongly-typed projection of the subset of submission
//! fields one business-service operation consumes. Requests are constructed
//! once per submission and immutable thereafter.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::{AnmId, CaseId};

use crate::error::FormError;
use crate::fields;
use crate::submission::FormSubmission;

fn not_blank_case_id(id: &CaseId) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::new("blank_case_id"));
    }
    Ok(())
}

fn not_blank_anm_id(id: &AnmId) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::new("blank_anm_id"));
    }
    Ok(())
}

/// Auxiliary data accompanying certain submissions: the details sub-map to
/// merge into the case blob, and an optional reporting sub-map that feeds a
/// report record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraData {
    #[serde(default)]
    pub details: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting: Option<HashMap<String, String>>,
}

impl ExtraData {
    pub fn with_details(details: HashMap<String, String>) -> Self {
        Self {
            details,
            reporting: None,
        }
    }

    pub fn and_reporting(mut self, reporting: HashMap<String, String>) -> Self {
        self.reporting = Some(reporting);
        self
    }
}

/// Request for a family-planning method update on an existing couple.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct FamilyPlanningUpdateRequest {
    #[validate(custom(function = "not_blank_case_id"))]
    pub case_id: CaseId,
    #[validate(custom(function = "not_blank_anm_id"))]
    pub anm_id: AnmId,
    pub current_method: Option<String>,
    pub fp_start_date: Option<NaiveDate>,
}

impl FamilyPlanningUpdateRequest {
    pub fn new(case_id: impl Into<CaseId>, anm_id: impl Into<AnmId>) -> Self {
        Self {
            case_id: case_id.into(),
            anm_id: anm_id.into(),
            current_method: None,
            fp_start_date: None,
        }
    }

    pub fn with_current_method(mut self, method: impl Into<String>) -> Self {
        self.current_method = Some(method.into());
        self
    }

    pub fn with_fp_start_date(mut self, date: NaiveDate) -> Self {
        self.fp_start_date = Some(date);
        self
    }

    pub fn from_submission(submission: &FormSubmission) -> Result<Self, FormError> {
        let request = Self {
            case_id: submission.entity_id.clone(),
            anm_id: submission.anm_id.clone(),
            current_method: submission.field(fields::CURRENT_METHOD).map(str::to_string),
            fp_start_date: submission.date_field(fields::FP_START_DATE)?,
        };
        request.validate()?;
        Ok(request)
    }

    /// True when the couple has begun actively using a method: both the
    /// method and its start date are known. This is the condition under
    /// which the stale complication alert window is closed.
    pub fn has_started_method(&self) -> bool {
        self.current_method.is_some() && self.fp_start_date.is_some()
    }
}

/// Request to register a couple whose subject was registered elsewhere.
///
/// Carries no usable case identifier: the couple receives a freshly
/// generated one at registration.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct OutOfAreaRegistrationRequest {
    /// Identifier of the submission's subject in the originating system,
    /// kept for traceability only.
    pub source_entity_id: CaseId,
    pub wife_name: String,
    #[validate(custom(function = "not_blank_anm_id"))]
    pub anm_id: AnmId,
    pub husband_name: String,
    pub village: String,
    pub sub_center: String,
    pub phc: String,
    pub thayi_card_number: Option<String>,
    pub registration_date: Option<NaiveDate>,
    pub phone_number: Option<String>,
}

impl OutOfAreaRegistrationRequest {
    pub fn from_submission(submission: &FormSubmission) -> Result<Self, FormError> {
        let request = Self {
            source_entity_id: submission.entity_id.clone(),
            wife_name: submission.require(fields::WIFE_NAME)?.to_string(),
            anm_id: submission.anm_id.clone(),
            husband_name: submission.field_or_default(fields::HUSBAND_NAME),
            village: submission.field_or_default(fields::VILLAGE),
            sub_center: submission.field_or_default(fields::SUB_CENTER),
            phc: submission.field_or_default(fields::PHC),
            thayi_card_number: submission.field(fields::THAYI_CARD_NUMBER).map(str::to_string),
            registration_date: submission.date_field(fields::REGISTRATION_DATE)?,
            phone_number: submission.field(fields::PHONE_NUMBER).map(str::to_string),
        };
        request.validate()?;
        Ok(request)
    }
}

/// Request to close a case, shared by all three domains.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CaseCloseRequest {
    #[validate(custom(function = "not_blank_case_id"))]
    pub case_id: CaseId,
    #[validate(custom(function = "not_blank_anm_id"))]
    pub anm_id: AnmId,
}

impl CaseCloseRequest {
    pub fn new(case_id: impl Into<CaseId>, anm_id: impl Into<AnmId>) -> Self {
        Self {
            case_id: case_id.into(),
            anm_id: anm_id.into(),
        }
    }

    pub fn from_submission(submission: &FormSubmission) -> Result<Self, FormError> {
        let request = Self {
            case_id: submission.entity_id.clone(),
            anm_id: submission.anm_id.clone(),
        };
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::forms;

    #[test]
    fn test_fp_update_extraction() {
        let submission = FormSubmission::new(forms::FP_UPDATE, "CASE X", "ANM X")
            .with_field(fields::CURRENT_METHOD, "condom")
            .with_field(fields::FP_START_DATE, "2012-01-01");

        let request = FamilyPlanningUpdateRequest::from_submission(&submission).unwrap();

        assert_eq!(request.case_id, CaseId::new("CASE X"));
        assert_eq!(request.current_method.as_deref(), Some("condom"));
        assert!(request.has_started_method());
    }

    #[test]
    fn test_fp_update_without_start_date_has_not_started() {
        let submission = FormSubmission::new(forms::FP_UPDATE, "CASE X", "ANM X")
            .with_field(fields::CURRENT_METHOD, "condom");
        let request = FamilyPlanningUpdateRequest::from_submission(&submission).unwrap();
        assert!(!request.has_started_method());
    }

    #[test]
    fn test_blank_entity_id_is_rejected() {
        let submission = FormSubmission::new(forms::FP_UPDATE, "", "ANM X");
        let err = FamilyPlanningUpdateRequest::from_submission(&submission).unwrap_err();
        assert!(matches!(err, FormError::Invalid(_)));
    }

    #[test]
    fn test_out_of_area_extraction_defaults_optional_fields() {
        let submission =
            FormSubmission::new(forms::OUT_OF_AREA_ANC_REGISTRATION, "CASE X", "ANM X")
                .with_field(fields::WIFE_NAME, "Wife 1");

        let request = OutOfAreaRegistrationRequest::from_submission(&submission).unwrap();

        assert_eq!(request.wife_name, "Wife 1");
        assert_eq!(request.husband_name, "");
        assert_eq!(request.village, "");
        assert_eq!(request.registration_date, None);
        assert_eq!(request.phone_number, None);
    }

    #[test]
    fn test_out_of_area_requires_wife_name() {
        let submission =
            FormSubmission::new(forms::OUT_OF_AREA_ANC_REGISTRATION, "CASE X", "ANM X");
        let err = OutOfAreaRegistrationRequest::from_submission(&submission).unwrap_err();
        assert!(matches!(err, FormError::MissingMandatoryField { .. }));
    }

    #[test]
    fn test_extra_data_wire_shape() {
        let extra: ExtraData = serde_json::from_str(
            r#"{"details": {"currentMethod": "condom"}, "reporting": {"currentMethod": "condom"}}"#,
        )
        .unwrap();
        assert_eq!(extra.details.get("currentMethod").unwrap(), "condom");
        assert!(extra.reporting.is_some());
    }
}
