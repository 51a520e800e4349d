//! Service wiring
//!
//! Assembles the three domain services over the in-memory adapters. The
//! backends are handed back alongside the state so callers (the server
//! binary, integration tests) can seed cases and inspect the logs.

use std::sync::Arc;

use core_kernel::UuidGenerator;
use domain_anc::AncService;
use domain_ec::EcService;
use domain_pnc::PncService;
use form_model::ReportFieldsDefinition;
use infra_mem::{
    InMemoryActionStream, InMemoryChildRepository, InMemoryCoupleRepository,
    InMemoryMotherRepository, InMemoryReportLog, InMemoryScheduleLog, InMemoryTrackingLog,
};

use crate::dispatch::FormDispatcher;
use crate::AppState;

/// Handles on the process-local backends behind the services.
pub struct InMemoryBackends {
    pub couples: Arc<InMemoryCoupleRepository>,
    pub mothers: Arc<InMemoryMotherRepository>,
    pub children: Arc<InMemoryChildRepository>,
    pub reports: Arc<InMemoryReportLog>,
    pub schedules: Arc<InMemoryScheduleLog>,
    pub actions: Arc<InMemoryActionStream>,
    pub tracking: Arc<InMemoryTrackingLog>,
}

/// Builds the application state over fresh in-memory backends.
pub fn build_in_memory_state(
    report_fields: ReportFieldsDefinition,
) -> (AppState, InMemoryBackends) {
    let report_fields = Arc::new(report_fields);
    let couples = Arc::new(InMemoryCoupleRepository::new());
    let mothers = Arc::new(InMemoryMotherRepository::new());
    let children = Arc::new(InMemoryChildRepository::new());
    let reports = Arc::new(InMemoryReportLog::new());
    let schedules = Arc::new(InMemoryScheduleLog::new());
    let actions = Arc::new(InMemoryActionStream::new());
    let tracking = Arc::new(InMemoryTrackingLog::new());

    let ec = Arc::new(EcService::new(
        couples.clone(),
        actions.clone(),
        reports.clone(),
        Arc::new(UuidGenerator),
        schedules.clone(),
        report_fields.clone(),
    ));
    let anc = Arc::new(AncService::new(
        mothers.clone(),
        actions.clone(),
        reports.clone(),
        schedules.clone(),
        tracking.clone(),
        report_fields.clone(),
    ));
    let pnc = Arc::new(PncService::new(
        children.clone(),
        actions.clone(),
        reports.clone(),
        schedules.clone(),
        tracking.clone(),
        report_fields,
    ));

    let state = AppState {
        dispatcher: Arc::new(FormDispatcher::new(ec, anc, pnc)),
    };
    let backends = InMemoryBackends {
        couples,
        mothers,
        children,
        reports,
        schedules,
        actions,
        tracking,
    };
    (state, backends)
}
