//! Family-planning product information forwarded to the scheduler

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{AnmId, CaseId};
use form_model::{fields, FormError, FormSubmission};

/// The structured value handed to the scheduler when a method changes or a
/// product is renewed.
///
/// Fields absent from the submission are `None`, never a sentinel. Renewal
/// submissions carry no new method or change date, so those fields come out
/// `None` for them by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FpProductInformation {
    pub case_id: CaseId,
    pub anm_id: AnmId,
    pub new_method: Option<String>,
    pub dmpa_injection_date: Option<NaiveDate>,
    pub number_of_ocp_delivered: Option<u32>,
    pub ocp_refill_date: Option<NaiveDate>,
    pub number_of_condoms_supplied: Option<u32>,
    pub submission_date: Option<NaiveDate>,
    /// The method in use before the change.
    pub current_method: Option<String>,
    pub fp_method_change_date: Option<NaiveDate>,
}

impl FpProductInformation {
    pub fn from_submission(submission: &FormSubmission) -> Result<Self, FormError> {
        Ok(Self {
            case_id: submission.entity_id.clone(),
            anm_id: submission.anm_id.clone(),
            new_method: submission.field(fields::NEW_METHOD).map(str::to_string),
            dmpa_injection_date: submission.date_field(fields::DMPA_INJECTION_DATE)?,
            number_of_ocp_delivered: submission.count_field(fields::NUMBER_OF_OCP_DELIVERED)?,
            ocp_refill_date: submission.date_field(fields::OCP_REFILL_DATE)?,
            number_of_condoms_supplied: submission.count_field(fields::NUMBER_OF_CONDOMS_SUPPLIED)?,
            submission_date: submission.date_field(fields::SUBMISSION_DATE)?,
            current_method: submission.field(fields::CURRENT_METHOD).map(str::to_string),
            fp_method_change_date: submission
                .date_field(fields::FAMILY_PLANNING_METHOD_CHANGE_DATE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_model::fields::forms;

    #[test]
    fn test_change_submission_extraction() {
        let submission = FormSubmission::new(forms::FP_CHANGE, "entity id 1", "anm id 1")
            .with_field(fields::CURRENT_METHOD, "previous method")
            .with_field(fields::NEW_METHOD, "new method")
            .with_field(fields::SUBMISSION_DATE, "2011-01-01")
            .with_field(fields::FAMILY_PLANNING_METHOD_CHANGE_DATE, "2011-01-02")
            .with_field(fields::NUMBER_OF_OCP_DELIVERED, "1")
            .with_field(fields::NUMBER_OF_CONDOMS_SUPPLIED, "20");

        let product = FpProductInformation::from_submission(&submission).unwrap();

        assert_eq!(product.new_method.as_deref(), Some("new method"));
        assert_eq!(product.current_method.as_deref(), Some("previous method"));
        assert_eq!(product.number_of_ocp_delivered, Some(1));
        assert_eq!(product.number_of_condoms_supplied, Some(20));
        // absent in the submission, so never a sentinel
        assert_eq!(product.dmpa_injection_date, None);
        assert_eq!(product.ocp_refill_date, None);
    }

    #[test]
    fn test_renewal_submission_has_no_change_fields() {
        let submission = FormSubmission::new(forms::RENEW_FP_PRODUCT, "entity id 1", "anm id 1")
            .with_field(fields::CURRENT_METHOD, "fp method")
            .with_field(fields::DMPA_INJECTION_DATE, "2010-12-20")
            .with_field(fields::OCP_REFILL_DATE, "2010-12-25");

        let product = FpProductInformation::from_submission(&submission).unwrap();

        assert_eq!(product.new_method, None);
        assert_eq!(product.fp_method_change_date, None);
        assert_eq!(
            product.dmpa_injection_date,
            Some(NaiveDate::from_ymd_opt(2010, 12, 20).unwrap())
        );
    }
}
