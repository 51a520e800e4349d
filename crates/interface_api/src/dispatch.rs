//! Form dispatch
//!
//! Maps the form-name tag of an incoming submission to the one business
//! operation that handles it. The mapping is a fixed `match`: adding a form
//! type means adding an arm here, and an unrecognized tag is rejected
//! before any service runs.

use std::sync::Arc;

use serde::Serialize;

use core_kernel::{CaseId, Outcome};
use domain_anc::AncService;
use domain_ec::EcService;
use domain_pnc::PncService;
use form_model::fields::forms;
use form_model::{
    CaseCloseRequest, ExtraData, FamilyPlanningUpdateRequest, FormSubmission,
    OutOfAreaRegistrationRequest,
};

use crate::error::ApiError;

/// The outcome of dispatching one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum DispatchOutcome {
    /// The operation ran its side effects. Registrations that mint a case
    /// identifier return it.
    #[serde(rename_all = "camelCase")]
    Applied {
        #[serde(skip_serializing_if = "Option::is_none")]
        case_id: Option<CaseId>,
    },
    /// The target case does not exist; the submission was dropped by the
    /// existence guard.
    Skipped,
}

impl DispatchOutcome {
    fn applied() -> Self {
        DispatchOutcome::Applied { case_id: None }
    }

    fn from_guard(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Applied => Self::applied(),
            Outcome::SkippedMissingCase => DispatchOutcome::Skipped,
        }
    }
}

/// Routes submissions to the three domain services.
pub struct FormDispatcher {
    ec: Arc<EcService>,
    anc: Arc<AncService>,
    pnc: Arc<PncService>,
}

impl FormDispatcher {
    pub fn new(ec: Arc<EcService>, anc: Arc<AncService>, pnc: Arc<PncService>) -> Self {
        Self { ec, anc, pnc }
    }

    /// Dispatches one submission by its form-name tag.
    pub async fn handle(
        &self,
        submission: &FormSubmission,
        extra_data: &ExtraData,
    ) -> Result<DispatchOutcome, ApiError> {
        tracing::debug!(form_name = %submission.form_name, case_id = %submission.entity_id, "dispatching submission");

        match submission.form_name.as_str() {
            forms::EC_REGISTRATION => {
                self.ec.register_eligible_couple(submission).await?;
                Ok(DispatchOutcome::applied())
            }
            forms::OUT_OF_AREA_ANC_REGISTRATION => {
                let request = OutOfAreaRegistrationRequest::from_submission(submission)?;
                let case_id = self
                    .ec
                    .register_out_of_area_couple(&request, extra_data)
                    .await?;
                Ok(DispatchOutcome::Applied {
                    case_id: Some(case_id),
                })
            }
            forms::FP_UPDATE => {
                let request = FamilyPlanningUpdateRequest::from_submission(submission)?;
                let outcome = self
                    .ec
                    .update_family_planning_method(&request, extra_data)
                    .await?;
                Ok(DispatchOutcome::from_guard(outcome))
            }
            forms::FP_CHANGE => {
                let outcome = self.ec.report_fp_change(submission).await?;
                Ok(DispatchOutcome::from_guard(outcome))
            }
            forms::RENEW_FP_PRODUCT => {
                let outcome = self.ec.renew_fp_product(submission).await?;
                Ok(DispatchOutcome::from_guard(outcome))
            }
            forms::EC_CLOSE => {
                let request = CaseCloseRequest::from_submission(submission)?;
                let outcome = self.ec.close_eligible_couple(&request).await?;
                Ok(DispatchOutcome::from_guard(outcome))
            }
            forms::ANC_REGISTRATION => {
                self.anc.register_mother(submission).await?;
                Ok(DispatchOutcome::applied())
            }
            forms::ANC_VISIT => {
                let outcome = self.anc.provide_anc_care(submission).await?;
                Ok(DispatchOutcome::from_guard(outcome))
            }
            forms::ANC_OUTCOME => {
                let outcome = self.anc.update_anc_outcome(submission).await?;
                Ok(DispatchOutcome::from_guard(outcome))
            }
            forms::ANC_CLOSE => {
                let request = CaseCloseRequest::from_submission(submission)?;
                let outcome = self.anc.close_mother(&request).await?;
                Ok(DispatchOutcome::from_guard(outcome))
            }
            forms::CHILD_REGISTRATION => {
                self.pnc.register_child(submission).await?;
                Ok(DispatchOutcome::applied())
            }
            forms::CHILD_IMMUNIZATION => {
                let outcome = self.pnc.update_child_immunizations(submission).await?;
                Ok(DispatchOutcome::from_guard(outcome))
            }
            forms::CHILD_CLOSE => {
                let request = CaseCloseRequest::from_submission(submission)?;
                let outcome = self.pnc.close_child(&request).await?;
                Ok(DispatchOutcome::from_guard(outcome))
            }
            unknown => Err(ApiError::UnknownFormType(unknown.to_string())),
        }
    }
}
