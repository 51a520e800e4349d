//! Eligible-couple domain ports
//!
//! The couple service talks to four collaborators, each behind a trait so
//! implementations can be swapped (in-memory, database, remote service,
//! recording mock):
//!
//! - `EligibleCoupleRepository`: the case store
//! - `EcReportingSink`: append-only analytics records, one method per kind
//! - `EcSchedulingPort`: future milestones and alert windows
//! - `EcActionPort`: alert/action cascade toward field-worker devices
//!
//! All methods return `Result<_, PortError>`; the service propagates any
//! failure unmodified and performs no retries.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{AnmId, CaseId, PortError};
use form_model::{FamilyPlanningUpdateRequest, ReportData};

use crate::couple::EligibleCouple;
use crate::product::FpProductInformation;

/// Lookup, registration and mutation of couple case records.
///
/// `update_details` must merge atomically per call and return the
/// post-merge record; same-case races resolve last-writer-wins inside the
/// adapter.
#[async_trait]
pub trait EligibleCoupleRepository: Send + Sync {
    async fn find_by_case_id(&self, case_id: &CaseId)
        -> Result<Option<EligibleCouple>, PortError>;

    async fn exists(&self, case_id: &CaseId) -> Result<bool, PortError>;

    async fn register(&self, couple: EligibleCouple) -> Result<(), PortError>;

    async fn update(&self, couple: EligibleCouple) -> Result<(), PortError>;

    /// Merges the partial map into the stored details blob, new keys
    /// overriding old ones sharing a name, and returns the updated record.
    async fn update_details(
        &self,
        case_id: &CaseId,
        details: &HashMap<String, String>,
    ) -> Result<EligibleCouple, PortError>;

    async fn close(&self, case_id: &CaseId) -> Result<(), PortError>;
}

/// Append-only reporting sink, one method per report kind.
#[async_trait]
pub trait EcReportingSink: Send + Sync {
    async fn register_ec(&self, report: ReportData) -> Result<(), PortError>;

    async fn update_family_planning_method(&self, report: ReportData) -> Result<(), PortError>;

    async fn fp_change(&self, report: ReportData) -> Result<(), PortError>;
}

/// Care-schedule manager for family-planning milestones.
#[async_trait]
pub trait EcSchedulingPort: Send + Sync {
    async fn enroll_to_fp_complications(
        &self,
        case_id: &CaseId,
        current_method: Option<String>,
        is_high_priority: bool,
        submission_date: Option<NaiveDate>,
    ) -> Result<(), PortError>;

    async fn enroll_to_renew_fp_products(
        &self,
        case_id: &CaseId,
        current_method: Option<String>,
        dmpa_injection_date: Option<NaiveDate>,
        number_of_ocp_delivered: Option<u32>,
        ocp_refill_date: Option<NaiveDate>,
    ) -> Result<(), PortError>;

    /// Lets the scheduler decide whether to open or modify a
    /// complication-monitoring alert for the couple's new method.
    async fn update_fp_complications(
        &self,
        request: &FamilyPlanningUpdateRequest,
        couple: &EligibleCouple,
    ) -> Result<(), PortError>;

    async fn fp_change(&self, product: FpProductInformation) -> Result<(), PortError>;

    async fn renew_fp_product(&self, product: FpProductInformation) -> Result<(), PortError>;
}

/// Alert/action cascade toward the field-worker-facing action stream.
#[async_trait]
pub trait EcActionPort: Send + Sync {
    /// Carries the full merged details blob, not just the delta.
    async fn update_eligible_couple_details(
        &self,
        case_id: &CaseId,
        anm_id: &AnmId,
        details: HashMap<String, String>,
    ) -> Result<(), PortError>;

    async fn mark_alert_as_closed(
        &self,
        case_id: &CaseId,
        anm_id: &AnmId,
        milestone: &str,
        completion_date: NaiveDate,
    ) -> Result<(), PortError>;

    async fn close_eligible_couple(&self, case_id: &CaseId, anm_id: &AnmId)
        -> Result<(), PortError>;
}

/// Recording mock adapters for testing.
///
/// Each mock stores every received call so tests can verify the exact
/// fan-out, including the central guard property: zero collaborator calls
/// when the target case does not exist.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// A mutation received by the mock repository. Lookups are counted
    /// separately since the existence guard is allowed exactly one.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RepositoryMutation {
        Registered(EligibleCouple),
        Updated(EligibleCouple),
        UpdatedDetails {
            case_id: CaseId,
            details: HashMap<String, String>,
        },
        Closed(CaseId),
    }

    #[derive(Debug, Default)]
    pub struct MockCoupleRepository {
        couples: Mutex<HashMap<CaseId, EligibleCouple>>,
        mutations: Mutex<Vec<RepositoryMutation>>,
        lookups: Mutex<Vec<CaseId>>,
    }

    impl MockCoupleRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_couple(self, couple: EligibleCouple) -> Self {
            self.couples
                .lock()
                .unwrap()
                .insert(couple.case_id.clone(), couple);
            self
        }

        pub fn stored(&self, case_id: &CaseId) -> Option<EligibleCouple> {
            self.couples.lock().unwrap().get(case_id).cloned()
        }

        pub fn mutations(&self) -> Vec<RepositoryMutation> {
            self.mutations.lock().unwrap().clone()
        }

        pub fn mutation_count(&self) -> usize {
            self.mutations.lock().unwrap().len()
        }

        pub fn lookup_count(&self) -> usize {
            self.lookups.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EligibleCoupleRepository for MockCoupleRepository {
        async fn find_by_case_id(
            &self,
            case_id: &CaseId,
        ) -> Result<Option<EligibleCouple>, PortError> {
            self.lookups.lock().unwrap().push(case_id.clone());
            Ok(self
                .couples
                .lock()
                .unwrap()
                .get(case_id)
                .filter(|couple| couple.is_active())
                .cloned())
        }

        async fn exists(&self, case_id: &CaseId) -> Result<bool, PortError> {
            self.lookups.lock().unwrap().push(case_id.clone());
            Ok(self
                .couples
                .lock()
                .unwrap()
                .get(case_id)
                .is_some_and(EligibleCouple::is_active))
        }

        async fn register(&self, couple: EligibleCouple) -> Result<(), PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::Registered(couple.clone()));
            self.couples
                .lock()
                .unwrap()
                .insert(couple.case_id.clone(), couple);
            Ok(())
        }

        async fn update(&self, couple: EligibleCouple) -> Result<(), PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::Updated(couple.clone()));
            self.couples
                .lock()
                .unwrap()
                .insert(couple.case_id.clone(), couple);
            Ok(())
        }

        async fn update_details(
            &self,
            case_id: &CaseId,
            details: &HashMap<String, String>,
        ) -> Result<EligibleCouple, PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::UpdatedDetails {
                    case_id: case_id.clone(),
                    details: details.clone(),
                });
            let mut couples = self.couples.lock().unwrap();
            let couple = couples
                .get(case_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("EligibleCouple", case_id))?
                .with_merged_details(details);
            couples.insert(case_id.clone(), couple.clone());
            Ok(couple)
        }

        async fn close(&self, case_id: &CaseId) -> Result<(), PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::Closed(case_id.clone()));
            if let Some(couple) = self.couples.lock().unwrap().get_mut(case_id) {
                couple.close();
            }
            Ok(())
        }
    }

    /// Which reporting method received a record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ReportKind {
        RegisterEc,
        UpdateFamilyPlanningMethod,
        FpChange,
    }

    #[derive(Debug, Default)]
    pub struct MockReportingSink {
        reports: Mutex<Vec<(ReportKind, ReportData)>>,
    }

    impl MockReportingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reports(&self) -> Vec<(ReportKind, ReportData)> {
            self.reports.lock().unwrap().clone()
        }

        pub fn report_count(&self) -> usize {
            self.reports.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EcReportingSink for MockReportingSink {
        async fn register_ec(&self, report: ReportData) -> Result<(), PortError> {
            self.reports
                .lock()
                .unwrap()
                .push((ReportKind::RegisterEc, report));
            Ok(())
        }

        async fn update_family_planning_method(
            &self,
            report: ReportData,
        ) -> Result<(), PortError> {
            self.reports
                .lock()
                .unwrap()
                .push((ReportKind::UpdateFamilyPlanningMethod, report));
            Ok(())
        }

        async fn fp_change(&self, report: ReportData) -> Result<(), PortError> {
            self.reports
                .lock()
                .unwrap()
                .push((ReportKind::FpChange, report));
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SchedulerCall {
        EnrollToFpComplications {
            case_id: CaseId,
            current_method: Option<String>,
            is_high_priority: bool,
            submission_date: Option<NaiveDate>,
        },
        EnrollToRenewFpProducts {
            case_id: CaseId,
            current_method: Option<String>,
            dmpa_injection_date: Option<NaiveDate>,
            number_of_ocp_delivered: Option<u32>,
            ocp_refill_date: Option<NaiveDate>,
        },
        UpdateFpComplications {
            request: FamilyPlanningUpdateRequest,
            couple: EligibleCouple,
        },
        FpChange(FpProductInformation),
        RenewFpProduct(FpProductInformation),
    }

    #[derive(Debug, Default)]
    pub struct MockScheduler {
        calls: Mutex<Vec<SchedulerCall>>,
    }

    impl MockScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<SchedulerCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EcSchedulingPort for MockScheduler {
        async fn enroll_to_fp_complications(
            &self,
            case_id: &CaseId,
            current_method: Option<String>,
            is_high_priority: bool,
            submission_date: Option<NaiveDate>,
        ) -> Result<(), PortError> {
            self.calls
                .lock()
                .unwrap()
                .push(SchedulerCall::EnrollToFpComplications {
                    case_id: case_id.clone(),
                    current_method,
                    is_high_priority,
                    submission_date,
                });
            Ok(())
        }

        async fn enroll_to_renew_fp_products(
            &self,
            case_id: &CaseId,
            current_method: Option<String>,
            dmpa_injection_date: Option<NaiveDate>,
            number_of_ocp_delivered: Option<u32>,
            ocp_refill_date: Option<NaiveDate>,
        ) -> Result<(), PortError> {
            self.calls
                .lock()
                .unwrap()
                .push(SchedulerCall::EnrollToRenewFpProducts {
                    case_id: case_id.clone(),
                    current_method,
                    dmpa_injection_date,
                    number_of_ocp_delivered,
                    ocp_refill_date,
                });
            Ok(())
        }

        async fn update_fp_complications(
            &self,
            request: &FamilyPlanningUpdateRequest,
            couple: &EligibleCouple,
        ) -> Result<(), PortError> {
            self.calls
                .lock()
                .unwrap()
                .push(SchedulerCall::UpdateFpComplications {
                    request: request.clone(),
                    couple: couple.clone(),
                });
            Ok(())
        }

        async fn fp_change(&self, product: FpProductInformation) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(SchedulerCall::FpChange(product));
            Ok(())
        }

        async fn renew_fp_product(&self, product: FpProductInformation) -> Result<(), PortError> {
            self.calls
                .lock()
                .unwrap()
                .push(SchedulerCall::RenewFpProduct(product));
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ActionCall {
        UpdateEligibleCoupleDetails {
            case_id: CaseId,
            anm_id: AnmId,
            details: HashMap<String, String>,
        },
        MarkAlertAsClosed {
            case_id: CaseId,
            anm_id: AnmId,
            milestone: String,
            completion_date: NaiveDate,
        },
        CloseEligibleCouple {
            case_id: CaseId,
            anm_id: AnmId,
        },
    }

    #[derive(Debug, Default)]
    pub struct MockActionService {
        calls: Mutex<Vec<ActionCall>>,
    }

    impl MockActionService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<ActionCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EcActionPort for MockActionService {
        async fn update_eligible_couple_details(
            &self,
            case_id: &CaseId,
            anm_id: &AnmId,
            details: HashMap<String, String>,
        ) -> Result<(), PortError> {
            self.calls
                .lock()
                .unwrap()
                .push(ActionCall::UpdateEligibleCoupleDetails {
                    case_id: case_id.clone(),
                    anm_id: anm_id.clone(),
                    details,
                });
            Ok(())
        }

        async fn mark_alert_as_closed(
            &self,
            case_id: &CaseId,
            anm_id: &AnmId,
            milestone: &str,
            completion_date: NaiveDate,
        ) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(ActionCall::MarkAlertAsClosed {
                case_id: case_id.clone(),
                anm_id: anm_id.clone(),
                milestone: milestone.to_string(),
                completion_date,
            });
            Ok(())
        }

        async fn close_eligible_couple(
            &self,
            case_id: &CaseId,
            anm_id: &AnmId,
        ) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(ActionCall::CloseEligibleCouple {
                case_id: case_id.clone(),
                anm_id: anm_id.clone(),
            });
            Ok(())
        }
    }
}
