//! Antenatal-care domain ports

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{AnmId, CaseId, PortError};
use form_model::ReportData;

use crate::mother::Mother;

/// Lookup, registration and mutation of mother case records.
#[async_trait]
pub trait MotherRepository: Send + Sync {
    async fn find_by_case_id(&self, case_id: &CaseId) -> Result<Option<Mother>, PortError>;

    async fn exists(&self, case_id: &CaseId) -> Result<bool, PortError>;

    async fn register(&self, mother: Mother) -> Result<(), PortError>;

    async fn update(&self, mother: Mother) -> Result<(), PortError>;

    /// Merges the partial map into the stored details blob and returns the
    /// updated record.
    async fn update_details(
        &self,
        case_id: &CaseId,
        details: &HashMap<String, String>,
    ) -> Result<Mother, PortError>;

    async fn close(&self, case_id: &CaseId) -> Result<(), PortError>;
}

/// Append-only reporting sink, one method per report kind.
#[async_trait]
pub trait AncReportingSink: Send + Sync {
    async fn register_mother(&self, report: ReportData) -> Result<(), PortError>;

    async fn anc_visit(&self, report: ReportData) -> Result<(), PortError>;

    async fn anc_outcome(&self, report: ReportData) -> Result<(), PortError>;
}

/// Care-schedule manager for antenatal milestones.
#[async_trait]
pub trait AncSchedulingPort: Send + Sync {
    /// Enrolls the mother into the visit schedule, anchored on the LMP date
    /// when known.
    async fn enroll_to_anc_care(
        &self,
        case_id: &CaseId,
        lmp_date: Option<NaiveDate>,
    ) -> Result<(), PortError>;

    async fn anc_care_provided(
        &self,
        case_id: &CaseId,
        visit_number: Option<u32>,
        visit_date: Option<NaiveDate>,
    ) -> Result<(), PortError>;
}

/// Alert/action cascade toward the field-worker-facing action stream.
#[async_trait]
pub trait AncActionPort: Send + Sync {
    async fn close_mother(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError>;
}

/// External case-tracking system mirror. Every mother-case lifecycle event
/// is forwarded here alongside the domain side effects.
#[async_trait]
pub trait AncTrackingPort: Send + Sync {
    async fn register_anc_case(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError>;

    async fn anc_care_provided(
        &self,
        case_id: &CaseId,
        visit_number: Option<u32>,
        visit_date: Option<NaiveDate>,
    ) -> Result<(), PortError>;

    async fn anc_outcome_updated(
        &self,
        case_id: &CaseId,
        outcome: Option<String>,
    ) -> Result<(), PortError>;

    async fn close_anc_case(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RepositoryMutation {
        Registered(Mother),
        Updated(Mother),
        UpdatedDetails {
            case_id: CaseId,
            details: HashMap<String, String>,
        },
        Closed(CaseId),
    }

    #[derive(Debug, Default)]
    pub struct MockMotherRepository {
        mothers: Mutex<HashMap<CaseId, Mother>>,
        mutations: Mutex<Vec<RepositoryMutation>>,
        lookups: Mutex<Vec<CaseId>>,
    }

    impl MockMotherRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_mother(self, mother: Mother) -> Self {
            self.mothers
                .lock()
                .unwrap()
                .insert(mother.case_id.clone(), mother);
            self
        }

        pub fn stored(&self, case_id: &CaseId) -> Option<Mother> {
            self.mothers.lock().unwrap().get(case_id).cloned()
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
    impl MotherRepository for MockMotherRepository {
        async fn find_by_case_id(&self, case_id: &CaseId) -> Result<Option<Mother>, PortError> {
            self.lookups.lock().unwrap().push(case_id.clone());
            Ok(self
                .mothers
                .lock()
                .unwrap()
                .get(case_id)
                .filter(|mother| mother.is_active())
                .cloned())
        }

        async fn exists(&self, case_id: &CaseId) -> Result<bool, PortError> {
            self.lookups.lock().unwrap().push(case_id.clone());
            Ok(self
                .mothers
                .lock()
                .unwrap()
                .get(case_id)
                .is_some_and(Mother::is_active))
        }

        async fn register(&self, mother: Mother) -> Result<(), PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::Registered(mother.clone()));
            self.mothers
                .lock()
                .unwrap()
                .insert(mother.case_id.clone(), mother);
            Ok(())
        }

        async fn update(&self, mother: Mother) -> Result<(), PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::Updated(mother.clone()));
            self.mothers
                .lock()
                .unwrap()
                .insert(mother.case_id.clone(), mother);
            Ok(())
        }

        async fn update_details(
            &self,
            case_id: &CaseId,
            details: &HashMap<String, String>,
        ) -> Result<Mother, PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::UpdatedDetails {
                    case_id: case_id.clone(),
                    details: details.clone(),
                });
            let mut mothers = self.mothers.lock().unwrap();
            let mother = mothers
                .get(case_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Mother", case_id))?
                .with_merged_details(details);
            mothers.insert(case_id.clone(), mother.clone());
            Ok(mother)
        }

        async fn close(&self, case_id: &CaseId) -> Result<(), PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::Closed(case_id.clone()));
            if let Some(mother) = self.mothers.lock().unwrap().get_mut(case_id) {
                mother.close();
            }
            Ok(())
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ReportKind {
        RegisterMother,
        AncVisit,
        AncOutcome,
    }

    #[derive(Debug, Default)]
    pub struct MockAncReportingSink {
        reports: Mutex<Vec<(ReportKind, ReportData)>>,
    }

    impl MockAncReportingSink {
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
    impl AncReportingSink for MockAncReportingSink {
        async fn register_mother(&self, report: ReportData) -> Result<(), PortError> {
            self.reports
                .lock()
                .unwrap()
                .push((ReportKind::RegisterMother, report));
            Ok(())
        }

        async fn anc_visit(&self, report: ReportData) -> Result<(), PortError> {
            self.reports
                .lock()
                .unwrap()
                .push((ReportKind::AncVisit, report));
            Ok(())
        }

        async fn anc_outcome(&self, report: ReportData) -> Result<(), PortError> {
            self.reports
                .lock()
                .unwrap()
                .push((ReportKind::AncOutcome, report));
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SchedulerCall {
        EnrollToAncCare {
            case_id: CaseId,
            lmp_date: Option<NaiveDate>,
        },
        AncCareProvided {
            case_id: CaseId,
            visit_number: Option<u32>,
            visit_date: Option<NaiveDate>,
        },
    }

    #[derive(Debug, Default)]
    pub struct MockAncScheduler {
        calls: Mutex<Vec<SchedulerCall>>,
    }

    impl MockAncScheduler {
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
    impl AncSchedulingPort for MockAncScheduler {
        async fn enroll_to_anc_care(
            &self,
            case_id: &CaseId,
            lmp_date: Option<NaiveDate>,
        ) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(SchedulerCall::EnrollToAncCare {
                case_id: case_id.clone(),
                lmp_date,
            });
            Ok(())
        }

        async fn anc_care_provided(
            &self,
            case_id: &CaseId,
            visit_number: Option<u32>,
            visit_date: Option<NaiveDate>,
        ) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(SchedulerCall::AncCareProvided {
                case_id: case_id.clone(),
                visit_number,
                visit_date,
            });
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ActionCall {
        CloseMother { case_id: CaseId, anm_id: AnmId },
    }

    #[derive(Debug, Default)]
    pub struct MockAncActionService {
        calls: Mutex<Vec<ActionCall>>,
    }

    impl MockAncActionService {
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
    impl AncActionPort for MockAncActionService {
        async fn close_mother(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(ActionCall::CloseMother {
                case_id: case_id.clone(),
                anm_id: anm_id.clone(),
            });
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum TrackingCall {
        RegisterAncCase {
            case_id: CaseId,
            anm_id: AnmId,
        },
        AncCareProvided {
            case_id: CaseId,
            visit_number: Option<u32>,
            visit_date: Option<NaiveDate>,
        },
        AncOutcomeUpdated {
            case_id: CaseId,
            outcome: Option<String>,
        },
        CloseAncCase {
            case_id: CaseId,
            anm_id: AnmId,
        },
    }

    #[derive(Debug, Default)]
    pub struct MockAncTracker {
        calls: Mutex<Vec<TrackingCall>>,
    }

    impl MockAncTracker {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<TrackingCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AncTrackingPort for MockAncTracker {
        async fn register_anc_case(
            &self,
            case_id: &CaseId,
            anm_id: &AnmId,
        ) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(TrackingCall::RegisterAncCase {
                case_id: case_id.clone(),
                anm_id: anm_id.clone(),
            });
            Ok(())
        }

        async fn anc_care_provided(
            &self,
            case_id: &CaseId,
            visit_number: Option<u32>,
            visit_date: Option<NaiveDate>,
        ) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(TrackingCall::AncCareProvided {
                case_id: case_id.clone(),
                visit_number,
                visit_date,
            });
            Ok(())
        }

        async fn anc_outcome_updated(
            &self,
            case_id: &CaseId,
            outcome: Option<String>,
        ) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(TrackingCall::AncOutcomeUpdated {
                case_id: case_id.clone(),
                outcome,
            });
            Ok(())
        }

        async fn close_anc_case(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(TrackingCall::CloseAncCase {
                case_id: case_id.clone(),
                anm_id: anm_id.clone(),
            });
            Ok(())
        }
    }
}
