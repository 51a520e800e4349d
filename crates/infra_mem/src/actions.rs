//! In-memory action stream
//!
//! Stands in for the action feed consumed by field-worker devices. Actions
//! append in arrival order; the log can be drained by a future sync
//! surface but is primarily observable through tests and tracing.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::info;

use core_kernel::{AnmId, CaseId, PortError};
use domain_anc::ports::AncActionPort;
use domain_ec::ports::EcActionPort;
use domain_pnc::ports::PncActionPort;

/// An appended action record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    /// Named after the action method that received the call.
    pub kind: &'static str,
    pub case_id: CaseId,
    pub anm_id: AnmId,
    pub payload: Value,
}

/// Append-only, process-local action stream implementing the action port
/// of all three domains.
#[derive(Debug, Default)]
pub struct InMemoryActionStream {
    records: RwLock<Vec<ActionRecord>>,
}

impl InMemoryActionStream {
    pub fn new() -> Self {
        Self::default()
    }

    async fn append(&self, kind: &'static str, case_id: &CaseId, anm_id: &AnmId, payload: Value) {
        info!(kind, case_id = %case_id, anm_id = %anm_id, "action appended");
        self.records.write().await.push(ActionRecord {
            kind,
            case_id: case_id.clone(),
            anm_id: anm_id.clone(),
            payload,
        });
    }

    pub async fn records(&self) -> Vec<ActionRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl EcActionPort for InMemoryActionStream {
    async fn update_eligible_couple_details(
        &self,
        case_id: &CaseId,
        anm_id: &AnmId,
        details: HashMap<String, String>,
    ) -> Result<(), PortError> {
        self.append(
            "update_eligible_couple_details",
            case_id,
            anm_id,
            json!({ "details": details }),
        )
        .await;
        Ok(())
    }

    async fn mark_alert_as_closed(
        &self,
        case_id: &CaseId,
        anm_id: &AnmId,
        milestone: &str,
        completion_date: NaiveDate,
    ) -> Result<(), PortError> {
        self.append(
            "mark_alert_as_closed",
            case_id,
            anm_id,
            json!({ "milestone": milestone, "completionDate": completion_date }),
        )
        .await;
        Ok(())
    }

    async fn close_eligible_couple(
        &self,
        case_id: &CaseId,
        anm_id: &AnmId,
    ) -> Result<(), PortError> {
        self.append("close_eligible_couple", case_id, anm_id, Value::Null)
            .await;
        Ok(())
    }
}

#[async_trait]
impl AncActionPort for InMemoryActionStream {
    async fn close_mother(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError> {
        self.append("close_mother", case_id, anm_id, Value::Null).await;
        Ok(())
    }
}

#[async_trait]
impl PncActionPort for InMemoryActionStream {
    async fn mark_alert_as_closed(
        &self,
        case_id: &CaseId,
        anm_id: &AnmId,
        milestone: &str,
        completion_date: NaiveDate,
    ) -> Result<(), PortError> {
        self.append(
            "mark_alert_as_closed",
            case_id,
            anm_id,
            json!({ "milestone": milestone, "completionDate": completion_date }),
        )
        .await;
        Ok(())
    }

    async fn close_child(&self, case_id: &CaseId, anm_id: &AnmId) -> Result<(), PortError> {
        self.append("close_child", case_id, anm_id, Value::Null).await;
        Ok(())
    }
}
