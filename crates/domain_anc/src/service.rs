//! Antenatal-care business service

use std::sync::Arc;

use core_kernel::guard::{when_exists, when_present};
use core_kernel::Outcome;
use form_model::fields::{self, forms};
use form_model::{CaseCloseRequest, FormSubmission, ReportData, ReportFieldsDefinition};

use crate::error::AncError;
use crate::mother::Mother;
use crate::ports::{
    AncActionPort, AncReportingSink, AncSchedulingPort, AncTrackingPort, MotherRepository,
};

const ENTITY: &str = "Mother";

/// Orchestrates mother-case lifecycle submissions.
pub struct AncService {
    mothers: Arc<dyn MotherRepository>,
    actions: Arc<dyn AncActionPort>,
    reporting: Arc<dyn AncReportingSink>,
    scheduling: Arc<dyn AncSchedulingPort>,
    tracking: Arc<dyn AncTrackingPort>,
    report_fields: Arc<ReportFieldsDefinition>,
}

impl AncService {
    pub fn new(
        mothers: Arc<dyn MotherRepository>,
        actions: Arc<dyn AncActionPort>,
        reporting: Arc<dyn AncReportingSink>,
        scheduling: Arc<dyn AncSchedulingPort>,
        tracking: Arc<dyn AncTrackingPort>,
        report_fields: Arc<ReportFieldsDefinition>,
    ) -> Self {
        Self {
            mothers,
            actions,
            reporting,
            scheduling,
            tracking,
            report_fields,
        }
    }

    /// Handles an `anc_registration` submission: creates the mother case,
    /// reports the registration, enrolls the mother into the visit
    /// schedule anchored on her LMP date and mirrors the registration to
    /// the external tracking system.
    pub async fn register_mother(&self, submission: &FormSubmission) -> Result<(), AncError> {
        tracing::info!(case_id = %submission.entity_id, "mother registration");

        let mother = Mother::from_registration(submission)?;
        let lmp_date = mother.lmp_date;
        self.mothers.register(mother).await?;

        let allow_list = self.report_fields.get(forms::ANC_REGISTRATION);
        self.reporting
            .register_mother(ReportData::from_submission(submission, allow_list))
            .await?;

        self.scheduling
            .enroll_to_anc_care(&submission.entity_id, lmp_date)
            .await?;
        self.tracking
            .register_anc_case(&submission.entity_id, &submission.anm_id)
            .await?;
        Ok(())
    }

    /// Records an antenatal care visit against an existing mother case.
    ///
    /// Guarded: a missing mother yields `Outcome::SkippedMissingCase` with
    /// zero further collaborator calls. On the applied path the visit
    /// fields are merged into the case blob, the visit is reported through
    /// the `anc_visit` allow-list, the scheduler advances the visit
    /// milestone and the tracking system receives the same visit data.
    pub async fn provide_anc_care(
        &self,
        submission: &FormSubmission,
    ) -> Result<Outcome, AncError> {
        tracing::info!(case_id = %submission.entity_id, "anc care visit");

        let found = self.mothers.find_by_case_id(&submission.entity_id).await?;
        when_present(ENTITY, &submission.entity_id, found, |_mother| async move {
            self.mothers
                .update_details(&submission.entity_id, &submission.form_fields)
                .await?;

            let allow_list = self.report_fields.get(forms::ANC_VISIT);
            self.reporting
                .anc_visit(ReportData::from_submission(submission, allow_list))
                .await?;

            let visit_number = submission.count_field(fields::VISIT_NUMBER)?;
            let visit_date = submission.date_field(fields::VISIT_DATE)?;
            self.scheduling
                .anc_care_provided(&submission.entity_id, visit_number, visit_date)
                .await?;
            self.tracking
                .anc_care_provided(&submission.entity_id, visit_number, visit_date)
                .await?;
            Ok(())
        })
        .await
    }

    /// Records the outcome of a pregnancy against an existing mother case.
    ///
    /// Guarded like a visit. On the applied path the outcome fields are
    /// merged into the case blob, reported through the `anc_outcome`
    /// allow-list and mirrored to the tracking system.
    pub async fn update_anc_outcome(
        &self,
        submission: &FormSubmission,
    ) -> Result<Outcome, AncError> {
        tracing::info!(case_id = %submission.entity_id, "anc outcome update");

        let found = self.mothers.find_by_case_id(&submission.entity_id).await?;
        when_present(ENTITY, &submission.entity_id, found, |_mother| async move {
            self.mothers
                .update_details(&submission.entity_id, &submission.form_fields)
                .await?;

            let allow_list = self.report_fields.get(forms::ANC_OUTCOME);
            self.reporting
                .anc_outcome(ReportData::from_submission(submission, allow_list))
                .await?;

            self.tracking
                .anc_outcome_updated(
                    &submission.entity_id,
                    submission
                        .field(fields::PREGNANCY_OUTCOME)
                        .map(str::to_string),
                )
                .await?;
            Ok(())
        })
        .await
    }

    /// Closes a mother's case.
    pub async fn close_mother(&self, request: &CaseCloseRequest) -> Result<Outcome, AncError> {
        tracing::info!(case_id = %request.case_id, "mother case close");

        let exists = self.mothers.exists(&request.case_id).await?;
        when_exists(ENTITY, &request.case_id, exists, || async move {
            self.mothers.close(&request.case_id).await?;
            self.actions
                .close_mother(&request.case_id, &request.anm_id)
                .await?;
            self.tracking
                .close_anc_case(&request.case_id, &request.anm_id)
                .await?;
            Ok(())
        })
        .await
    }
}
