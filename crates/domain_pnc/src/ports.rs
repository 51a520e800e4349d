//! Postnatal-care domain ports

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{AnmId, CaseId, PortError};
use form_model::ReportData;

use crate::child::Child;

/// Lookup, registration and mutation of child case records.
#[async_trait]
pub trait ChildRepository: Send + Sync {
    async fn find_by_case_id(&self, case_id: &CaseId) -> Result<Option<Child>, PortError>;

    async fn exists(&self, case_id: &CaseId) -> Result<bool, PortError>;

    async fn register(&self, child: Child) -> Result<(), PortError>;

    async fn update(&self, child: Child) -> Result<(), PortError>;

    /// Merges the partial map into the stored details blob and returns the
    /// updated record.
    async fn update_details(
        &self,
        case_id: &CaseId,
        details: &HashMap<String, String>,
    ) -> Result<Child, PortError>;

    async fn close(&self, case_id: &CaseId) -> Result<(), PortError>;
}

/// Append-only reporting sink, one method per report kind.
#[async_trait]
pub trait PncReportingSink: Send + Sync {
    async fn register_child(&self, report: ReportData) -> Result<(), PortError>;

    async fn child_immunization(&self, report: ReportData) -> Result<(), PortError>;
}

/// Care-schedule manager for immunization milestones.
#[async_trait]
pub trait PncSchedulingPort: Send + Sync {
    /// Enrolls the child into the immunization schedule, anchored on the
    /// date of birth when known.
    async fn enroll_to_immunizations(
        &self,
        case_id: &CaseId,
        date_of_birth: Option<NaiveDate>,
    ) -> Result<(), PortError>;

    async fn immunizations_provided(
        &self,
        case_id: &CaseId,
        immunizations: Vec<String>,
        immunization_date: Option<NaiveDate>,
    ) -> Result<(), PortError>;
}

/// Alert/action cascade toward the field-worker-facing action stream.
#[async_trait]
pub trait PncActionPort: Send + Sync {
    async fn mark_alert_as_closed(
        &self,
        case_id: &CaseId,
        anm_id: &AnmId,
        milestone: &str,
        completion_date: NaiveDate,
    ) -> Result<(), PortError>;

    async fn close_child(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError>;
}

/// External case-tracking system mirror. Every child-case lifecycle event
/// is forwarded here alongside the domain side effects.
#[async_trait]
pub trait PncTrackingPort: Send + Sync {
    async fn register_child_case(&self, case_id: &CaseId, anm_id: &AnmId)
        -> Result<(), PortError>;

    async fn child_immunizations_updated(
        &self,
        case_id: &CaseId,
        immunizations: Vec<String>,
    ) -> Result<(), PortError>;

    async fn close_child_case(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RepositoryMutation {
        Registered(Child),
        Updated(Child),
        UpdatedDetails {
            case_id: CaseId,
            details: HashMap<String, String>,
        },
        Closed(CaseId),
    }

    #[derive(Debug, Default)]
    pub struct MockChildRepository {
        children: Mutex<HashMap<CaseId, Child>>,
        mutations: Mutex<Vec<RepositoryMutation>>,
        lookups: Mutex<Vec<CaseId>>,
    }

    impl MockChildRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_child(self, child: Child) -> Self {
            self.children
                .lock()
                .unwrap()
                .insert(child.case_id.clone(), child);
            self
        }

        pub fn stored(&self, case_id: &CaseId) -> Option<Child> {
            self.children.lock().unwrap().get(case_id).cloned()
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
    impl ChildRepository for MockChildRepository {
        async fn find_by_case_id(&self, case_id: &CaseId) -> Result<Option<Child>, PortError> {
            self.lookups.lock().unwrap().push(case_id.clone());
            Ok(self
                .children
                .lock()
                .unwrap()
                .get(case_id)
                .filter(|child| child.is_active())
                .cloned())
        }

        async fn exists(&self, case_id: &CaseId) -> Result<bool, PortError> {
            self.lookups.lock().unwrap().push(case_id.clone());
            Ok(self
                .children
                .lock()
                .unwrap()
                .get(case_id)
                .is_some_and(Child::is_active))
        }

        async fn register(&self, child: Child) -> Result<(), PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::Registered(child.clone()));
            self.children
                .lock()
                .unwrap()
                .insert(child.case_id.clone(), child);
            Ok(())
        }

        async fn update(&self, child: Child) -> Result<(), PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::Updated(child.clone()));
            self.children
                .lock()
                .unwrap()
                .insert(child.case_id.clone(), child);
            Ok(())
        }

        async fn update_details(
            &self,
            case_id: &CaseId,
            details: &HashMap<String, String>,
        ) -> Result<Child, PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::UpdatedDetails {
                    case_id: case_id.clone(),
                    details: details.clone(),
                });
            let mut children = self.children.lock().unwrap();
            let child = children
                .get(case_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Child", case_id))?
                .with_merged_details(details);
            children.insert(case_id.clone(), child.clone());
            Ok(child)
        }

        async fn close(&self, case_id: &CaseId) -> Result<(), PortError> {
            self.mutations
                .lock()
                .unwrap()
                .push(RepositoryMutation::Closed(case_id.clone()));
            if let Some(child) = self.children.lock().unwrap().get_mut(case_id) {
                child.close();
            }
            Ok(())
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ReportKind {
        RegisterChild,
        ChildImmunization,
    }

    #[derive(Debug, Default)]
    pub struct MockPncReportingSink {
        reports: Mutex<Vec<(ReportKind, ReportData)>>,
    }

    impl MockPncReportingSink {
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
    impl PncReportingSink for MockPncReportingSink {
        async fn register_child(&self, report: ReportData) -> Result<(), PortError> {
            self.reports
                .lock()
                .unwrap()
                .push((ReportKind::RegisterChild, report));
            Ok(())
        }

        async fn child_immunization(&self, report: ReportData) -> Result<(), PortError> {
            self.reports
                .lock()
                .unwrap()
                .push((ReportKind::ChildImmunization, report));
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SchedulerCall {
        EnrollToImmunizations {
            case_id: CaseId,
            date_of_birth: Option<NaiveDate>,
        },
        ImmunizationsProvided {
            case_id: CaseId,
            immunizations: Vec<String>,
            immunization_date: Option<NaiveDate>,
        },
    }

    #[derive(Debug, Default)]
    pub struct MockPncScheduler {
        calls: Mutex<Vec<SchedulerCall>>,
    }

    impl MockPncScheduler {
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
    impl PncSchedulingPort for MockPncScheduler {
        async fn enroll_to_immunizations(
            &self,
            case_id: &CaseId,
            date_of_birth: Option<NaiveDate>,
        ) -> Result<(), PortError> {
            self.calls
                .lock()
                .unwrap()
                .push(SchedulerCall::EnrollToImmunizations {
                    case_id: case_id.clone(),
                    date_of_birth,
                });
            Ok(())
        }

        async fn immunizations_provided(
            &self,
            case_id: &CaseId,
            immunizations: Vec<String>,
            immunization_date: Option<NaiveDate>,
        ) -> Result<(), PortError> {
            self.calls
                .lock()
                .unwrap()
                .push(SchedulerCall::ImmunizationsProvided {
                    case_id: case_id.clone(),
                    immunizations,
                    immunization_date,
                });
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ActionCall {
        MarkAlertAsClosed {
            case_id: CaseId,
            anm_id: AnmId,
            milestone: String,
            completion_date: NaiveDate,
        },
        CloseChild {
            case_id: CaseId,
            anm_id: AnmId,
        },
    }

    #[derive(Debug, Default)]
    pub struct MockPncActionService {
        calls: Mutex<Vec<ActionCall>>,
    }

    impl MockPncActionService {
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
    impl PncActionPort for MockPncActionService {
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

        async fn close_child(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(ActionCall::CloseChild {
                case_id: case_id.clone(),
                anm_id: anm_id.clone(),
            });
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum TrackingCall {
        RegisterChildCase {
            case_id: CaseId,
            anm_id: AnmId,
        },
        ChildImmunizationsUpdated {
            case_id: CaseId,
            immunizations: Vec<String>,
        },
        CloseChildCase {
            case_id: CaseId,
            anm_id: AnmId,
        },
    }

    #[derive(Debug, Default)]
    pub struct MockPncTracker {
        calls: Mutex<Vec<TrackingCall>>,
    }

    impl MockPncTracker {
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
    impl PncTrackingPort for MockPncTracker {
        async fn register_child_case(
            &self,
            case_id: &CaseId,
            anm_id: &AnmId,
        ) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(TrackingCall::RegisterChildCase {
                case_id: case_id.clone(),
                anm_id: anm_id.clone(),
            });
            Ok(())
        }

        async fn child_immunizations_updated(
            &self,
            case_id: &CaseId,
            immunizations: Vec<String>,
        ) -> Result<(), PortError> {
            self.calls
                .lock()
                .unwrap()
                .push(TrackingCall::ChildImmunizationsUpdated {
                    case_id: case_id.clone(),
                    immunizations,
                });
            Ok(())
        }

        async fn close_child_case(
            &self,
            case_id: &CaseId,
            anm_id: &AnmId,
        ) -> Result<(), PortError> {
            self.calls.lock().unwrap().push(TrackingCall::CloseChildCase {
                case_id: case_id.clone(),
                anm_id: anm_id.clone(),
            });
            Ok(())
        }
    }
}
