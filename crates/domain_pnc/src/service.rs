//! Postnatal-care business service

use std::sync::Arc;

use core_kernel::guard::{when_exists, when_present};
use core_kernel::Outcome;
use form_model::fields::{self, forms};
use form_model::{CaseCloseRequest, FormSubmission, ReportData, ReportFieldsDefinition};

use crate::child::{immunizations_given, Child};
use crate::error::PncError;
use crate::ports::{
    ChildRepository, PncActionPort, PncReportingSink, PncSchedulingPort, PncTrackingPort,
};

const ENTITY: &str = "Child";

/// Orchestrates child-case lifecycle submissions.
pub struct PncService {
    children: Arc<dyn ChildRepository>,
    actions: Arc<dyn PncActionPort>,
    reporting: Arc<dyn PncReportingSink>,
    scheduling: Arc<dyn PncSchedulingPort>,
    tracking: Arc<dyn PncTrackingPort>,
    report_fields: Arc<ReportFieldsDefinition>,
}

impl PncService {
    pub fn new(
        children: Arc<dyn ChildRepository>,
        actions: Arc<dyn PncActionPort>,
        reporting: Arc<dyn PncReportingSink>,
        scheduling: Arc<dyn PncSchedulingPort>,
        tracking: Arc<dyn PncTrackingPort>,
        report_fields: Arc<ReportFieldsDefinition>,
    ) -> Self {
        Self {
            children,
            actions,
            reporting,
            scheduling,
            tracking,
            report_fields,
        }
    }

    /// Handles a `child_registration` submission: creates the child case,
    /// reports the registration, enrolls the child into the immunization
    /// schedule anchored on the date of birth and mirrors the registration
    /// to the external tracking system.
    pub async fn register_child(&self, submission: &FormSubmission) -> Result<(), PncError> {
        tracing::info!(case_id = %submission.entity_id, "child registration");

        let child = Child::from_registration(submission)?;
        let date_of_birth = child.date_of_birth;
        self.children.register(child).await?;

        let allow_list = self.report_fields.get(forms::CHILD_REGISTRATION);
        self.reporting
            .register_child(ReportData::from_submission(submission, allow_list))
            .await?;

        self.scheduling
            .enroll_to_immunizations(&submission.entity_id, date_of_birth)
            .await?;
        self.tracking
            .register_child_case(&submission.entity_id, &submission.anm_id)
            .await?;
        Ok(())
    }

    /// Records provided immunizations against an existing child case.
    ///
    /// Guarded: a missing child yields `Outcome::SkippedMissingCase` with
    /// zero further collaborator calls. On the applied path the submission
    /// fields are merged into the case blob, the immunizations are reported
    /// through the `child_immunization` allow-list and forwarded to the
    /// scheduler and the tracking system. When both the immunization list
    /// and its date are present, each given immunization closes its
    /// milestone alert.
    pub async fn update_child_immunizations(
        &self,
        submission: &FormSubmission,
    ) -> Result<Outcome, PncError> {
        tracing::info!(case_id = %submission.entity_id, "child immunization update");

        let found = self.children.find_by_case_id(&submission.entity_id).await?;
        when_present(ENTITY, &submission.entity_id, found, |_child| async move {
            self.children
                .update_details(&submission.entity_id, &submission.form_fields)
                .await?;

            let allow_list = self.report_fields.get(forms::CHILD_IMMUNIZATION);
            self.reporting
                .child_immunization(ReportData::from_submission(submission, allow_list))
                .await?;

            let immunizations = immunizations_given(submission);
            let immunization_date = submission.date_field(fields::IMMUNIZATION_DATE)?;
            self.scheduling
                .immunizations_provided(
                    &submission.entity_id,
                    immunizations.clone(),
                    immunization_date,
                )
                .await?;
            self.tracking
                .child_immunizations_updated(&submission.entity_id, immunizations.clone())
                .await?;

            if let Some(completion_date) =
                immunization_date.filter(|_| !immunizations.is_empty())
            {
                for milestone in &immunizations {
                    self.actions
                        .mark_alert_as_closed(
                            &submission.entity_id,
                            &submission.anm_id,
                            milestone,
                            completion_date,
                        )
                        .await?;
                }
            }
            Ok(())
        })
        .await
    }

    /// Closes a child's case.
    pub async fn close_child(&self, request: &CaseCloseRequest) -> Result<Outcome, PncError> {
        tracing::info!(case_id = %request.case_id, "child case close");

        let exists = self.children.exists(&request.case_id).await?;
        when_exists(ENTITY, &request.case_id, exists, || async move {
            self.children.close(&request.case_id).await?;
            self.actions
                .close_child(&request.case_id, &request.anm_id)
                .await?;
            self.tracking
                .close_child_case(&request.case_id, &request.anm_id)
                .await?;
            Ok(())
        })
        .await
    }
}
