//! Eligible-couple business service
//!
//! Every mutating operation here follows the same shape: validate that the
//! subject case exists, then perform a sequence of independent side effects
//! against the repository, reporting and scheduling collaborators. The
//! fan-out is best-effort sequential: nothing is rolled back if a later
//! call fails, and a collaborator failure aborts the remaining calls for
//! that submission.

use std::sync::Arc;

use core_kernel::guard::{when_exists, when_present};
use core_kernel::{CaseId, IdGenerator, Outcome};
use form_model::fields::{self, forms};
use form_model::{
    CaseCloseRequest, ExtraData, FamilyPlanningUpdateRequest, FormSubmission,
    OutOfAreaRegistrationRequest, ReportData, ReportFieldsDefinition,
};

use crate::couple::{EligibleCouple, OUT_OF_AREA_EC_NUMBER};
use crate::error::EcError;
use crate::ports::{EcActionPort, EcReportingSink, EcSchedulingPort, EligibleCoupleRepository};
use crate::product::FpProductInformation;

/// Milestone name of the complication-monitoring alert, opened on method
/// adoption and closed on confirmed safe usage.
pub const FP_COMPLICATION_MILESTONE: &str = "FP Complication";

const ENTITY: &str = "EligibleCouple";

/// Orchestrates eligible-couple lifecycle submissions.
pub struct EcService {
    couples: Arc<dyn EligibleCoupleRepository>,
    actions: Arc<dyn EcActionPort>,
    reporting: Arc<dyn EcReportingSink>,
    id_generator: Arc<dyn IdGenerator>,
    scheduling: Arc<dyn EcSchedulingPort>,
    report_fields: Arc<ReportFieldsDefinition>,
}

impl EcService {
    pub fn new(
        couples: Arc<dyn EligibleCoupleRepository>,
        actions: Arc<dyn EcActionPort>,
        reporting: Arc<dyn EcReportingSink>,
        id_generator: Arc<dyn IdGenerator>,
        scheduling: Arc<dyn EcSchedulingPort>,
        report_fields: Arc<ReportFieldsDefinition>,
    ) -> Self {
        Self {
            couples,
            actions,
            reporting,
            id_generator,
            scheduling,
            report_fields,
        }
    }

    /// Handles an `ec_registration` submission for a couple whose case
    /// record was created by the out-of-band enrollment workflow.
    ///
    /// Assigns the submitting ANM to the case, reports the registration and
    /// unconditionally enrolls the couple into complication monitoring and
    /// product-renewal reminders.
    ///
    /// # Errors
    ///
    /// Fails with [`EcError::CoupleNotRegistered`] when the case record is
    /// absent: that is an enrollment-pipeline defect, not a guardable
    /// condition, and must surface loudly.
    pub async fn register_eligible_couple(
        &self,
        submission: &FormSubmission,
    ) -> Result<(), EcError> {
        tracing::info!(case_id = %submission.entity_id, "eligible couple registration");

        let couple = self
            .couples
            .find_by_case_id(&submission.entity_id)
            .await?
            .ok_or_else(|| EcError::CoupleNotRegistered(submission.entity_id.clone()))?;

        self.couples
            .update(couple.with_anm_identifier(submission.anm_id.clone()))
            .await?;

        let allow_list = self.report_fields.get(forms::EC_REGISTRATION);
        self.reporting
            .register_ec(ReportData::from_submission(submission, allow_list))
            .await?;

        let current_method = submission.field(fields::CURRENT_METHOD).map(str::to_string);
        self.scheduling
            .enroll_to_fp_complications(
                &submission.entity_id,
                current_method.clone(),
                submission.flag_field(fields::IS_HIGH_PRIORITY),
                submission.date_field(fields::SUBMISSION_DATE)?,
            )
            .await?;
        self.scheduling
            .enroll_to_renew_fp_products(
                &submission.entity_id,
                current_method,
                submission.date_field(fields::DMPA_INJECTION_DATE)?,
                submission.count_field(fields::NUMBER_OF_OCP_DELIVERED)?,
                submission.date_field(fields::OCP_REFILL_DATE)?,
            )
            .await?;

        Ok(())
    }

    /// Registers a couple for out-of-area ANC.
    ///
    /// The subject was registered elsewhere, so a fresh identifier is
    /// minted by the injected generator; it is never derived from
    /// submission content. Out-of-area couples are not yet locally
    /// trackable: no reporting or scheduling side effects are issued.
    pub async fn register_out_of_area_couple(
        &self,
        request: &OutOfAreaRegistrationRequest,
        extra_data: &ExtraData,
    ) -> Result<CaseId, EcError> {
        let case_id = CaseId::from(self.id_generator.generate_id());
        tracing::info!(
            case_id = %case_id,
            source_entity_id = %request.source_entity_id,
            "out-of-area eligible couple registration"
        );

        let couple = EligibleCouple::new(case_id.clone(), OUT_OF_AREA_EC_NUMBER)
            .with_couple(&request.wife_name, &request.husband_name)
            .with_anm_identifier(request.anm_id.clone())
            .with_location(core_kernel::Location::new(
                &request.village,
                &request.sub_center,
                &request.phc,
            ))
            .with_details(extra_data.details.clone())
            .as_out_of_area();

        self.couples.register(couple).await?;
        Ok(case_id)
    }

    /// Applies a family-planning method update to an existing couple.
    ///
    /// Guarded: a missing couple yields `Outcome::SkippedMissingCase` with
    /// zero further collaborator calls. On the applied path the details
    /// delta is merged into the case blob, the full merged blob is pushed
    /// to the action stream, an optional reporting sub-map becomes a report
    /// record, the scheduler re-evaluates the complication alert, and a
    /// confirmed method start closes the stale complication window.
    pub async fn update_family_planning_method(
        &self,
        request: &FamilyPlanningUpdateRequest,
        extra_data: &ExtraData,
    ) -> Result<Outcome, EcError> {
        tracing::info!(case_id = %request.case_id, "family planning method update");

        let found = self.couples.find_by_case_id(&request.case_id).await?;
        when_present(ENTITY, &request.case_id, found, |_couple| async move {
            let updated = self
                .couples
                .update_details(&request.case_id, &extra_data.details)
                .await?;

            self.actions
                .update_eligible_couple_details(
                    &request.case_id,
                    &request.anm_id,
                    updated.details.clone(),
                )
                .await?;

            if let Some(reporting) = &extra_data.reporting {
                self.reporting
                    .update_family_planning_method(ReportData::from_map(reporting.clone()))
                    .await?;
            }

            self.scheduling
                .update_fp_complications(request, &updated)
                .await?;

            if let Some(start_date) = request.fp_start_date.filter(|_| request.has_started_method())
            {
                self.actions
                    .mark_alert_as_closed(
                        &request.case_id,
                        &request.anm_id,
                        FP_COMPLICATION_MILESTONE,
                        start_date,
                    )
                    .await?;
            }
            Ok(())
        })
        .await
    }

    /// Reports a family-planning method change and forwards the product
    /// information to the scheduler.
    pub async fn report_fp_change(&self, submission: &FormSubmission) -> Result<Outcome, EcError> {
        tracing::info!(case_id = %submission.entity_id, "family planning method change");

        let found = self.couples.find_by_case_id(&submission.entity_id).await?;
        when_present(ENTITY, &submission.entity_id, found, |_couple| async move {
            let allow_list = self.report_fields.get(forms::FP_CHANGE);
            self.reporting
                .fp_change(ReportData::from_submission(submission, allow_list))
                .await?;

            let product = FpProductInformation::from_submission(submission)?;
            self.scheduling.fp_change(product).await?;
            Ok(())
        })
        .await
    }

    /// Forwards a product renewal to the scheduler. Renewals are
    /// schedule-only: no report record is emitted.
    pub async fn renew_fp_product(&self, submission: &FormSubmission) -> Result<Outcome, EcError> {
        tracing::info!(case_id = %submission.entity_id, "family planning product renewal");

        let found = self.couples.find_by_case_id(&submission.entity_id).await?;
        when_present(ENTITY, &submission.entity_id, found, |_couple| async move {
            let product = FpProductInformation::from_submission(submission)?;
            self.scheduling.renew_fp_product(product).await?;
            Ok(())
        })
        .await
    }

    /// Closes a couple's case and cascades alert closure.
    ///
    /// Guarded through the dedicated existence predicate: closing a
    /// non-existent couple is a no-op beyond the check itself.
    pub async fn close_eligible_couple(
        &self,
        request: &CaseCloseRequest,
    ) -> Result<Outcome, EcError> {
        tracing::info!(case_id = %request.case_id, "eligible couple close");

        let exists = self.couples.exists(&request.case_id).await?;
        when_exists(ENTITY, &request.case_id, exists, || async move {
            self.couples.close(&request.case_id).await?;
            self.actions
                .close_eligible_couple(&request.case_id, &request.anm_id)
                .await?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use uuid::Uuid;

    use core_kernel::ports::mock::FixedIdGenerator;
    use core_kernel::{AnmId, UuidGenerator};

    use crate::ports::mock::{
        ActionCall, MockActionService, MockCoupleRepository, MockReportingSink, MockScheduler,
        ReportKind, RepositoryMutation, SchedulerCall,
    };

    struct Fixture {
        service: EcService,
        couples: Arc<MockCoupleRepository>,
        actions: Arc<MockActionService>,
        reporting: Arc<MockReportingSink>,
        scheduler: Arc<MockScheduler>,
    }

    fn fixture(couples: MockCoupleRepository, report_fields: ReportFieldsDefinition) -> Fixture {
        fixture_with_generator(couples, report_fields, Arc::new(UuidGenerator))
    }

    fn fixture_with_generator(
        couples: MockCoupleRepository,
        report_fields: ReportFieldsDefinition,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Fixture {
        let couples = Arc::new(couples);
        let actions = Arc::new(MockActionService::new());
        let reporting = Arc::new(MockReportingSink::new());
        let scheduler = Arc::new(MockScheduler::new());
        let service = EcService::new(
            couples.clone(),
            actions.clone(),
            reporting.clone(),
            id_generator,
            scheduler.clone(),
            Arc::new(report_fields),
        );
        Fixture {
            service,
            couples,
            actions,
            reporting,
            scheduler,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn registration_fields() -> ReportFieldsDefinition {
        let mut fields = ReportFieldsDefinition::default();
        fields.insert(forms::EC_REGISTRATION, &["someKey"]);
        fields
    }

    #[tokio::test]
    async fn test_register_eligible_couple() {
        let couple =
            EligibleCouple::new("entity id 1", "0").with_couple("Wife 1", "Husband 1");
        let fx = fixture(
            MockCoupleRepository::new().with_couple(couple.clone()),
            registration_fields(),
        );
        let submission = FormSubmission::new(forms::EC_REGISTRATION, "entity id 1", "ANM X")
            .with_field("someKey", "someValue")
            .with_field(fields::CURRENT_METHOD, "some method")
            .with_field(fields::IS_HIGH_PRIORITY, "yes")
            .with_field(fields::SUBMISSION_DATE, "2011-01-01")
            .with_field(fields::DMPA_INJECTION_DATE, "2010-12-20")
            .with_field(fields::NUMBER_OF_OCP_DELIVERED, "1")
            .with_field(fields::OCP_REFILL_DATE, "2010-12-25");

        fx.service.register_eligible_couple(&submission).await.unwrap();

        assert_eq!(
            fx.couples.mutations(),
            vec![RepositoryMutation::Updated(
                couple.with_anm_identifier("ANM X")
            )]
        );
        assert_eq!(
            fx.reporting.reports(),
            vec![(
                ReportKind::RegisterEc,
                ReportData::from_map(map(&[("someKey", "someValue")]))
            )]
        );
        assert_eq!(
            fx.scheduler.calls(),
            vec![
                SchedulerCall::EnrollToFpComplications {
                    case_id: "entity id 1".into(),
                    current_method: Some("some method".to_string()),
                    is_high_priority: true,
                    submission_date: Some(date(2011, 1, 1)),
                },
                SchedulerCall::EnrollToRenewFpProducts {
                    case_id: "entity id 1".into(),
                    current_method: Some("some method".to_string()),
                    dmpa_injection_date: Some(date(2010, 12, 20)),
                    number_of_ocp_delivered: Some(1),
                    ocp_refill_date: Some(date(2010, 12, 25)),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_register_fails_loudly_when_case_record_is_missing() {
        let fx = fixture(MockCoupleRepository::new(), registration_fields());
        let submission = FormSubmission::new(forms::EC_REGISTRATION, "entity id 1", "ANM X");

        let err = fx
            .service
            .register_eligible_couple(&submission)
            .await
            .unwrap_err();

        assert!(matches!(err, EcError::CoupleNotRegistered(_)));
        assert_eq!(fx.couples.mutation_count(), 0);
        assert_eq!(fx.reporting.report_count(), 0);
        assert_eq!(fx.scheduler.call_count(), 0);
    }

    #[tokio::test]
    async fn test_register_out_of_area_couple() {
        let generated = Uuid::new_v4();
        let fx = fixture_with_generator(
            MockCoupleRepository::new(),
            ReportFieldsDefinition::default(),
            Arc::new(FixedIdGenerator::returning(vec![generated])),
        );
        let request = OutOfAreaRegistrationRequest {
            source_entity_id: "CASE X".into(),
            wife_name: "Wife 1".to_string(),
            anm_id: "ANM X".into(),
            husband_name: "Husband 1".to_string(),
            village: "Village X".to_string(),
            sub_center: "SubCenter X".to_string(),
            phc: "PHC X".to_string(),
            thayi_card_number: Some("TC 1".to_string()),
            registration_date: Some(date(2012, 5, 5)),
            phone_number: Some("9876543210".to_string()),
        };

        let case_id = fx
            .service
            .register_out_of_area_couple(&request, &ExtraData::default())
            .await
            .unwrap();

        assert_eq!(case_id, CaseId::from(generated));
        let expected = EligibleCouple::new(CaseId::from(generated), "0")
            .with_couple("Wife 1", "Husband 1")
            .with_anm_identifier("ANM X")
            .with_location(core_kernel::Location::new(
                "Village X",
                "SubCenter X",
                "PHC X",
            ))
            .as_out_of_area();
        assert_eq!(
            fx.couples.mutations(),
            vec![RepositoryMutation::Registered(expected)]
        );
        // not yet locally trackable: no reporting, no scheduling
        assert_eq!(fx.reporting.report_count(), 0);
        assert_eq!(fx.scheduler.call_count(), 0);
    }

    fn existing_couple() -> EligibleCouple {
        EligibleCouple::new("CASE X", "EC Number 1")
            .with_anm_identifier("ANM X")
            .with_location(core_kernel::Location::new(
                "Village X",
                "SubCenter X",
                "PHC X",
            ))
            .with_details(map(&[("existingThing", "existingValue")]))
    }

    #[tokio::test]
    async fn test_update_merges_details_and_creates_action() {
        let fx = fixture(
            MockCoupleRepository::new().with_couple(existing_couple()),
            ReportFieldsDefinition::default(),
        );
        let request = FamilyPlanningUpdateRequest::new("CASE X", "ANM X");
        let extra = ExtraData::with_details(map(&[("currentMethod", "CONDOM")]));

        let outcome = fx
            .service
            .update_family_planning_method(&request, &extra)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(
            fx.couples.mutations(),
            vec![RepositoryMutation::UpdatedDetails {
                case_id: "CASE X".into(),
                details: map(&[("currentMethod", "CONDOM")]),
            }]
        );
        let merged = map(&[
            ("existingThing", "existingValue"),
            ("currentMethod", "CONDOM"),
        ]);
        assert_eq!(
            fx.actions.calls(),
            vec![ActionCall::UpdateEligibleCoupleDetails {
                case_id: "CASE X".into(),
                anm_id: AnmId::new("ANM X"),
                details: merged,
            }]
        );
    }

    #[tokio::test]
    async fn test_update_reports_method_change_when_reporting_data_present() {
        let fx = fixture(
            MockCoupleRepository::new().with_couple(existing_couple()),
            ReportFieldsDefinition::default(),
        );
        let request = FamilyPlanningUpdateRequest::new("CASE X", "ANM X");
        let extra = ExtraData::with_details(map(&[("currentMethod", "CONDOM")]))
            .and_reporting(map(&[("currentMethod", "CONDOM")]));

        fx.service
            .update_family_planning_method(&request, &extra)
            .await
            .unwrap();

        assert_eq!(
            fx.reporting.reports(),
            vec![(
                ReportKind::UpdateFamilyPlanningMethod,
                ReportData::from_map(map(&[("currentMethod", "CONDOM")]))
            )]
        );
    }

    #[tokio::test]
    async fn test_update_does_not_report_without_reporting_data() {
        let fx = fixture(
            MockCoupleRepository::new().with_couple(existing_couple()),
            ReportFieldsDefinition::default(),
        );
        let request = FamilyPlanningUpdateRequest::new("CASE X", "ANM X");
        let extra = ExtraData::with_details(map(&[("currentMethod", "CONDOM")]));

        fx.service
            .update_family_planning_method(&request, &extra)
            .await
            .unwrap();

        assert_eq!(fx.reporting.report_count(), 0);
    }

    #[tokio::test]
    async fn test_update_lets_scheduler_reevaluate_complications() {
        let fx = fixture(
            MockCoupleRepository::new().with_couple(existing_couple()),
            ReportFieldsDefinition::default(),
        );
        let request =
            FamilyPlanningUpdateRequest::new("CASE X", "ANM X").with_current_method("CONDOM");
        let extra = ExtraData::with_details(map(&[("currentMethod", "CONDOM")]));

        fx.service
            .update_family_planning_method(&request, &extra)
            .await
            .unwrap();

        let expected_couple = existing_couple().with_merged_details(&map(&[(
            "currentMethod",
            "CONDOM",
        )]));
        assert_eq!(
            fx.scheduler.calls(),
            vec![SchedulerCall::UpdateFpComplications {
                request: request.clone(),
                couple: expected_couple,
            }]
        );
    }

    #[tokio::test]
    async fn test_update_closes_complication_alert_when_method_started() {
        let fx = fixture(
            MockCoupleRepository::new().with_couple(existing_couple()),
            ReportFieldsDefinition::default(),
        );
        let request = FamilyPlanningUpdateRequest::new("CASE X", "ANM X")
            .with_current_method("CONDOM")
            .with_fp_start_date(date(2012, 1, 1));
        let extra = ExtraData::with_details(map(&[("currentMethod", "CONDOM")]));

        fx.service
            .update_family_planning_method(&request, &extra)
            .await
            .unwrap();

        assert!(fx.actions.calls().contains(&ActionCall::MarkAlertAsClosed {
            case_id: "CASE X".into(),
            anm_id: AnmId::new("ANM X"),
            milestone: FP_COMPLICATION_MILESTONE.to_string(),
            completion_date: date(2012, 1, 1),
        }));
    }

    #[tokio::test]
    async fn test_update_keeps_complication_alert_open_without_start_date() {
        let fx = fixture(
            MockCoupleRepository::new().with_couple(existing_couple()),
            ReportFieldsDefinition::default(),
        );
        let request =
            FamilyPlanningUpdateRequest::new("CASE X", "ANM X").with_current_method("CONDOM");
        let extra = ExtraData::with_details(map(&[("currentMethod", "CONDOM")]));

        fx.service
            .update_family_planning_method(&request, &extra)
            .await
            .unwrap();

        assert!(!fx
            .actions
            .calls()
            .iter()
            .any(|call| matches!(call, ActionCall::MarkAlertAsClosed { .. })));
    }

    #[tokio::test]
    async fn test_update_skips_everything_when_couple_is_missing() {
        let fx = fixture(MockCoupleRepository::new(), ReportFieldsDefinition::default());
        let request = FamilyPlanningUpdateRequest::new("CASE X", "ANM X");
        let extra = ExtraData::with_details(map(&[("currentMethod", "CONDOM")]));

        let outcome = fx
            .service
            .update_family_planning_method(&request, &extra)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::SkippedMissingCase);
        assert_eq!(fx.couples.lookup_count(), 1);
        assert_eq!(fx.couples.mutation_count(), 0);
        assert_eq!(fx.actions.call_count(), 0);
        assert_eq!(fx.reporting.report_count(), 0);
        assert_eq!(fx.scheduler.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fp_change_is_reported_through_allow_list() {
        let mut report_fields = ReportFieldsDefinition::default();
        report_fields.insert(forms::FP_CHANGE, &["someKey"]);
        let fx = fixture(
            MockCoupleRepository::new()
                .with_couple(EligibleCouple::new("entity id 1", "EC Number 1")),
            report_fields,
        );
        let submission = FormSubmission::new(forms::FP_CHANGE, "entity id 1", "anm id 1")
            .with_field("someKey", "someValue")
            .with_field("unrelatedKey", "unrelatedValue");

        let outcome = fx.service.report_fp_change(&submission).await.unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(fx.couples.lookup_count(), 1);
        assert_eq!(
            fx.reporting.reports(),
            vec![(
                ReportKind::FpChange,
                ReportData::from_map(map(&[("someKey", "someValue")]))
            )]
        );
    }

    #[tokio::test]
    async fn test_fp_change_skips_everything_when_couple_is_missing() {
        let fx = fixture(MockCoupleRepository::new(), ReportFieldsDefinition::default());
        let submission = FormSubmission::new(forms::FP_CHANGE, "entity id 1", "anm id 1");

        let outcome = fx.service.report_fp_change(&submission).await.unwrap();

        assert_eq!(outcome, Outcome::SkippedMissingCase);
        assert_eq!(fx.couples.lookup_count(), 1);
        assert_eq!(fx.reporting.report_count(), 0);
        assert_eq!(fx.scheduler.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fp_change_forwards_product_information_to_scheduler() {
        let fx = fixture(
            MockCoupleRepository::new()
                .with_couple(EligibleCouple::new("entity id 1", "EC Number 1")),
            ReportFieldsDefinition::default(),
        );
        let submission = FormSubmission::new(forms::FP_CHANGE, "entity id 1", "anm id 1")
            .with_field(fields::CURRENT_METHOD, "previous method")
            .with_field(fields::NEW_METHOD, "new method")
            .with_field(fields::SUBMISSION_DATE, "2011-01-01")
            .with_field(fields::FAMILY_PLANNING_METHOD_CHANGE_DATE, "2011-01-02")
            .with_field(fields::NUMBER_OF_OCP_DELIVERED, "1")
            .with_field(fields::NUMBER_OF_CONDOMS_SUPPLIED, "20");

        fx.service.report_fp_change(&submission).await.unwrap();

        assert_eq!(
            fx.scheduler.calls(),
            vec![SchedulerCall::FpChange(FpProductInformation {
                case_id: "entity id 1".into(),
                anm_id: AnmId::new("anm id 1"),
                new_method: Some("new method".to_string()),
                dmpa_injection_date: None,
                number_of_ocp_delivered: Some(1),
                ocp_refill_date: None,
                number_of_condoms_supplied: Some(20),
                submission_date: Some(date(2011, 1, 1)),
                current_method: Some("previous method".to_string()),
                fp_method_change_date: Some(date(2011, 1, 2)),
            })]
        );
    }

    #[tokio::test]
    async fn test_renew_forwards_product_information_without_reporting() {
        let fx = fixture(
            MockCoupleRepository::new()
                .with_couple(EligibleCouple::new("entity id 1", "EC Number 1")),
            ReportFieldsDefinition::default(),
        );
        let submission = FormSubmission::new(forms::RENEW_FP_PRODUCT, "entity id 1", "anm id 1")
            .with_field(fields::CURRENT_METHOD, "fp method")
            .with_field(fields::SUBMISSION_DATE, "2011-01-01")
            .with_field(fields::NUMBER_OF_OCP_DELIVERED, "1")
            .with_field(fields::OCP_REFILL_DATE, "2010-12-25")
            .with_field(fields::DMPA_INJECTION_DATE, "2010-12-20")
            .with_field(fields::NUMBER_OF_CONDOMS_SUPPLIED, "20");

        let outcome = fx.service.renew_fp_product(&submission).await.unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(
            fx.scheduler.calls(),
            vec![SchedulerCall::RenewFpProduct(FpProductInformation {
                case_id: "entity id 1".into(),
                anm_id: AnmId::new("anm id 1"),
                new_method: None,
                dmpa_injection_date: Some(date(2010, 12, 20)),
                number_of_ocp_delivered: Some(1),
                ocp_refill_date: Some(date(2010, 12, 25)),
                number_of_condoms_supplied: Some(20),
                submission_date: Some(date(2011, 1, 1)),
                current_method: Some("fp method".to_string()),
                fp_method_change_date: None,
            })]
        );
        // renewals are schedule-only
        assert_eq!(fx.reporting.report_count(), 0);
    }

    #[tokio::test]
    async fn test_renew_skips_everything_when_couple_is_missing() {
        let fx = fixture(MockCoupleRepository::new(), ReportFieldsDefinition::default());
        let submission = FormSubmission::new(forms::RENEW_FP_PRODUCT, "entity id 1", "anm id 1");

        let outcome = fx.service.renew_fp_product(&submission).await.unwrap();

        assert_eq!(outcome, Outcome::SkippedMissingCase);
        assert_eq!(fx.couples.lookup_count(), 1);
        assert_eq!(fx.reporting.report_count(), 0);
        assert_eq!(fx.scheduler.call_count(), 0);
    }

    #[tokio::test]
    async fn test_close_eligible_couple() {
        let fx = fixture(
            MockCoupleRepository::new()
                .with_couple(EligibleCouple::new("CASE X", "EC Number 1")),
            ReportFieldsDefinition::default(),
        );
        let request = CaseCloseRequest::new("CASE X", "ANM X");

        let outcome = fx.service.close_eligible_couple(&request).await.unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(
            fx.couples.mutations(),
            vec![RepositoryMutation::Closed("CASE X".into())]
        );
        assert_eq!(
            fx.actions.calls(),
            vec![ActionCall::CloseEligibleCouple {
                case_id: "CASE X".into(),
                anm_id: AnmId::new("ANM X"),
            }]
        );
    }

    #[tokio::test]
    async fn test_close_is_a_noop_when_couple_does_not_exist() {
        let fx = fixture(MockCoupleRepository::new(), ReportFieldsDefinition::default());
        let request = CaseCloseRequest::new("CASE X", "ANM X");

        let outcome = fx.service.close_eligible_couple(&request).await.unwrap();

        assert_eq!(outcome, Outcome::SkippedMissingCase);
        assert_eq!(fx.couples.mutation_count(), 0);
        assert_eq!(fx.actions.call_count(), 0);
    }
}
