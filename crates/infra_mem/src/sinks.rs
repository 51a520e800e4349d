//! In-memory report log
//!
//! One adapter implements the reporting sink of all three domains: a
//! report is a report, whichever service emitted it. Records are appended
//! under a write lock and also traced, so a dev deployment shows its
//! reporting activity in the logs.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use core_kernel::PortError;
use domain_anc::ports::AncReportingSink;
use domain_ec::ports::EcReportingSink;
use domain_pnc::ports::PncReportingSink;
use form_model::ReportData;

/// An appended report record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    /// The report kind, named after the sink method that received it.
    pub kind: &'static str,
    pub data: ReportData,
}

/// Append-only, process-local reporting sink.
#[derive(Debug, Default)]
pub struct InMemoryReportLog {
    records: RwLock<Vec<ReportRecord>>,
}

impl InMemoryReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    async fn append(&self, kind: &'static str, data: ReportData) {
        info!(kind, fields = data.len(), "report recorded");
        self.records.write().await.push(ReportRecord { kind, data });
    }

    pub async fn records(&self) -> Vec<ReportRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl EcReportingSink for InMemoryReportLog {
    async fn register_ec(&self, report: ReportData) -> Result<(), PortError> {
        self.append("register_ec", report).await;
        Ok(())
    }

    async fn update_family_planning_method(&self, report: ReportData) -> Result<(), PortError> {
        self.append("update_family_planning_method", report).await;
        Ok(())
    }

    async fn fp_change(&self, report: ReportData) -> Result<(), PortError> {
        self.append("fp_change", report).await;
        Ok(())
    }
}

#[async_trait]
impl AncReportingSink for InMemoryReportLog {
    async fn register_mother(&self, report: ReportData) -> Result<(), PortError> {
        self.append("register_mother", report).await;
        Ok(())
    }

    async fn anc_visit(&self, report: ReportData) -> Result<(), PortError> {
        self.append("anc_visit", report).await;
        Ok(())
    }

    async fn anc_outcome(&self, report: ReportData) -> Result<(), PortError> {
        self.append("anc_outcome", report).await;
        Ok(())
    }
}

#[async_trait]
impl PncReportingSink for InMemoryReportLog {
    async fn register_child(&self, report: ReportData) -> Result<(), PortError> {
        self.append("register_child", report).await;
        Ok(())
    }

    async fn child_immunization(&self, report: ReportData) -> Result<(), PortError> {
        self.append("child_immunization", report).await;
        Ok(())
    }
}
