//! In-memory schedule log
//!
//! Stands in for the external care-schedule manager. Every scheduling call
//! becomes one appended record with a JSON payload of its arguments, traced
//! at info level.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::info;

use core_kernel::{CaseId, PortError};
use domain_anc::ports::AncSchedulingPort;
use domain_ec::ports::EcSchedulingPort;
use domain_ec::{EligibleCouple, FpProductInformation};
use domain_pnc::ports::PncSchedulingPort;
use form_model::FamilyPlanningUpdateRequest;

/// An appended scheduling record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRecord {
    /// Named after the scheduling method that received the call.
    pub kind: &'static str,
    pub case_id: CaseId,
    pub payload: Value,
}

/// Append-only, process-local schedule log implementing the scheduling
/// port of all three domains.
#[derive(Debug, Default)]
pub struct InMemoryScheduleLog {
    records: RwLock<Vec<ScheduleRecord>>,
}

impl InMemoryScheduleLog {
    pub fn new() -> Self {
        Self::default()
    }

    async fn append(&self, kind: &'static str, case_id: &CaseId, payload: Value) {
        info!(kind, case_id = %case_id, "schedule updated");
        self.records.write().await.push(ScheduleRecord {
            kind,
            case_id: case_id.clone(),
            payload,
        });
    }

    pub async fn records(&self) -> Vec<ScheduleRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl EcSchedulingPort for InMemoryScheduleLog {
    async fn enroll_to_fp_complications(
        &self,
        case_id: &CaseId,
        current_method: Option<String>,
        is_high_priority: bool,
        submission_date: Option<NaiveDate>,
    ) -> Result<(), PortError> {
        self.append(
            "enroll_to_fp_complications",
            case_id,
            json!({
                "currentMethod": current_method,
                "isHighPriority": is_high_priority,
                "submissionDate": submission_date,
            }),
        )
        .await;
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
        self.append(
            "enroll_to_renew_fp_products",
            case_id,
            json!({
                "currentMethod": current_method,
                "dmpaInjectionDate": dmpa_injection_date,
                "numberOfOCPDelivered": number_of_ocp_delivered,
                "ocpRefillDate": ocp_refill_date,
            }),
        )
        .await;
        Ok(())
    }

    async fn update_fp_complications(
        &self,
        request: &FamilyPlanningUpdateRequest,
        couple: &EligibleCouple,
    ) -> Result<(), PortError> {
        self.append(
            "update_fp_complications",
            &request.case_id,
            json!({
                "currentMethod": request.current_method,
                "fpStartDate": request.fp_start_date,
                "isOutOfArea": couple.is_out_of_area,
            }),
        )
        .await;
        Ok(())
    }

    async fn fp_change(&self, product: FpProductInformation) -> Result<(), PortError> {
        let case_id = product.case_id.clone();
        self.append("fp_change", &case_id, json!(product)).await;
        Ok(())
    }

    async fn renew_fp_product(&self, product: FpProductInformation) -> Result<(), PortError> {
        let case_id = product.case_id.clone();
        self.append("renew_fp_product", &case_id, json!(product)).await;
        Ok(())
    }
}

#[async_trait]
impl AncSchedulingPort for InMemoryScheduleLog {
    async fn enroll_to_anc_care(
        &self,
        case_id: &CaseId,
        lmp_date: Option<NaiveDate>,
    ) -> Result<(), PortError> {
        self.append("enroll_to_anc_care", case_id, json!({ "lmpDate": lmp_date }))
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
}

#[async_trait]
impl PncSchedulingPort for InMemoryScheduleLog {
    async fn enroll_to_immunizations(
        &self,
        case_id: &CaseId,
        date_of_birth: Option<NaiveDate>,
    ) -> Result<(), PortError> {
        self.append(
            "enroll_to_immunizations",
            case_id,
            json!({ "dateOfBirth": date_of_birth }),
        )
        .await;
        Ok(())
    }

    async fn immunizations_provided(
        &self,
        case_id: &CaseId,
        immunizations: Vec<String>,
        immunization_date: Option<NaiveDate>,
    ) -> Result<(), PortError> {
        self.append(
            "immunizations_provided",
            case_id,
            json!({
                "immunizations": immunizations,
                "immunizationDate": immunization_date,
            }),
        )
        .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures::{DateFixtures, IdFixtures};

    #[tokio::test]
    async fn test_records_carry_call_arguments() {
        let log = InMemoryScheduleLog::new();
        log.enroll_to_anc_care(&IdFixtures::case_id(), Some(DateFixtures::lmp_date()))
            .await
            .unwrap();

        let records = log.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, "enroll_to_anc_care");
        assert_eq!(records[0].payload["lmpDate"], json!("2011-10-01"));
    }
}
