//! In-memory case-tracking log
//!
//! Stands in for the external mother/child tracking system that mirrors
//! every ANC and PNC lifecycle event. One log serves both domains' ports.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::info;

use core_kernel::{AnmId, CaseId, PortError};
use domain_anc::ports::AncTrackingPort;
use domain_pnc::ports::PncTrackingPort;

/// An appended tracking record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingRecord {
    /// Named after the tracking method that received the call.
    pub kind: &'static str,
    pub case_id: CaseId,
    pub payload: Value,
}

/// Append-only, process-local tracking log implementing the tracking port
/// of both sibling domains.
#[derive(Debug, Default)]
pub struct InMemoryTrackingLog {
    records: RwLock<Vec<TrackingRecord>>,
}

impl InMemoryTrackingLog {
    pub fn new() -> Self {
        Self::default()
    }

    async fn append(&self, kind: &'static str, case_id: &CaseId, payload: Value) {
        info!(kind, case_id = %case_id, "case tracked");
        self.records.write().await.push(TrackingRecord {
            kind,
            case_id: case_id.clone(),
            payload,
        });
    }

    pub async fn records(&self) -> Vec<TrackingRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl AncTrackingPort for InMemoryTrackingLog {
    async fn register_anc_case(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError> {
        self.append("register_anc_case", case_id, json!({ "anmId": anm_id }))
            .await;
        Ok(())
    }

    async fn anc_care_provided(
        &self,
        case_id: &CaseId,
        visit_number: Option<u32>,
        visit_date: Option<NaiveDate>,
    ) -> Result<(), PortError> {
        self.append(
            "anc_care_provided",
            case_id,
            json!({ "visitNumber": visit_number, "visitDate": visit_date }),
        )
        .await;
        Ok(())
    }

    async fn anc_outcome_updated(
        &self,
        case_id: &CaseId,
        outcome: Option<String>,
    ) -> Result<(), PortError> {
        self.append(
            "anc_outcome_updated",
            case_id,
            json!({ "pregnancyOutcome": outcome }),
        )
        .await;
        Ok(())
    }

    async fn close_anc_case(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError> {
        self.append("close_anc_case", case_id, json!({ "anmId": anm_id }))
            .await;
        Ok(())
    }
}

#[async_trait]
impl PncTrackingPort for InMemoryTrackingLog {
    async fn register_child_case(
        &self,
        case_id: &CaseId,
        anm_id: &AnmId,
    ) -> Result<(), PortError> {
        self.append("register_child_case", case_id, json!({ "anmId": anm_id }))
            .await;
        Ok(())
    }

    async fn child_immunizations_updated(
        &self,
        case_id: &CaseId,
        immunizations: Vec<String>,
    ) -> Result<(), PortError> {
        self.append(
            "child_immunizations_updated",
            case_id,
            json!({ "immunizations": immunizations }),
        )
        .await;
        Ok(())
    }

    async fn close_child_case(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError> {
        self.append("close_child_case", case_id, json!({ "anmId": anm_id }))
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures::IdFixtures;

    #[tokio::test]
    async fn test_both_domains_share_one_log() {
        let log = InMemoryTrackingLog::new();
        log.register_anc_case(&IdFixtures::case_id(), &IdFixtures::anm_id())
            .await
            .unwrap();
        log.register_child_case(&IdFixtures::other_case_id(), &IdFixtures::anm_id())
            .await
            .unwrap();

        let records = log.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, "register_anc_case");
        assert_eq!(records[1].kind, "register_child_case");
        assert_eq!(records[0].payload["anmId"], json!("ANM X"));
    }
}
