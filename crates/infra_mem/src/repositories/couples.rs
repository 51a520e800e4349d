//! In-memory eligible-couple store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{CaseId, PortError};
use domain_ec::ports::EligibleCoupleRepository;
use domain_ec::EligibleCouple;

/// `EligibleCoupleRepository` backed by a lock-guarded map.
///
/// Closed cases stay in the map (cases are never deleted) but are invisible
/// to `find_by_case_id` and `exists`.
#[derive(Debug, Default)]
pub struct InMemoryCoupleRepository {
    couples: RwLock<HashMap<CaseId, EligibleCouple>>,
}

impl InMemoryCoupleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a case record, bypassing the registration flow. Used at
    /// startup to mirror the out-of-band enrollment pipeline.
    pub async fn seed(&self, couple: EligibleCouple) {
        self.couples
            .write()
            .await
            .insert(couple.case_id.clone(), couple);
    }
}

#[async_trait]
impl EligibleCoupleRepository for InMemoryCoupleRepository {
    async fn find_by_case_id(
        &self,
        case_id: &CaseId,
    ) -> Result<Option<EligibleCouple>, PortError> {
        Ok(self
            .couples
            .read()
            .await
            .get(case_id)
            .filter(|couple| couple.is_active())
            .cloned())
    }

    async fn exists(&self, case_id: &CaseId) -> Result<bool, PortError> {
        Ok(self
            .couples
            .read()
            .await
            .get(case_id)
            .is_some_and(EligibleCouple::is_active))
    }

    async fn register(&self, couple: EligibleCouple) -> Result<(), PortError> {
        debug!(case_id = %couple.case_id, "registering eligible couple");
        let mut couples = self.couples.write().await;
        if couples.contains_key(&couple.case_id) {
            return Err(PortError::conflict(format!(
                "eligible couple {} already registered",
                couple.case_id
            )));
        }
        couples.insert(couple.case_id.clone(), couple);
        Ok(())
    }

    async fn update(&self, couple: EligibleCouple) -> Result<(), PortError> {
        let mut couples = self.couples.write().await;
        if !couples.contains_key(&couple.case_id) {
            return Err(PortError::not_found("EligibleCouple", &couple.case_id));
        }
        couples.insert(couple.case_id.clone(), couple);
        Ok(())
    }

    async fn update_details(
        &self,
        case_id: &CaseId,
        details: &HashMap<String, String>,
    ) -> Result<EligibleCouple, PortError> {
        // Whole merge under the write lock: atomic per call.
        let mut couples = self.couples.write().await;
        let couple = couples
            .get(case_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("EligibleCouple", case_id))?
            .with_merged_details(details);
        couples.insert(case_id.clone(), couple.clone());
        Ok(couple)
    }

    async fn close(&self, case_id: &CaseId) -> Result<(), PortError> {
        debug!(case_id = %case_id, "closing eligible couple");
        let mut couples = self.couples.write().await;
        let couple = couples
            .get_mut(case_id)
            .ok_or_else(|| PortError::not_found("EligibleCouple", case_id))?;
        couple.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures::IdFixtures;

    fn couple() -> EligibleCouple {
        EligibleCouple::new(IdFixtures::case_id(), "EC Number 1").with_couple("Wife 1", "Husband 1")
    }

    #[tokio::test]
    async fn test_register_then_find() {
        let repo = InMemoryCoupleRepository::new();
        repo.register(couple()).await.unwrap();

        let found = repo.find_by_case_id(&IdFixtures::case_id()).await.unwrap();
        assert_eq!(found, Some(couple()));
        assert!(repo.exists(&IdFixtures::case_id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_double_registration_conflicts() {
        let repo = InMemoryCoupleRepository::new();
        repo.register(couple()).await.unwrap();

        let err = repo.register(couple()).await.unwrap_err();
        assert!(matches!(err, PortError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_details_merges_and_returns_record() {
        let repo = InMemoryCoupleRepository::new();
        repo.register(couple()).await.unwrap();

        let mut delta = HashMap::new();
        delta.insert("currentMethod".to_string(), "condom".to_string());
        let updated = repo
            .update_details(&IdFixtures::case_id(), &delta)
            .await
            .unwrap();

        assert_eq!(updated.details.get("currentMethod").unwrap(), "condom");
        let stored = repo
            .find_by_case_id(&IdFixtures::case_id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_closed_case_is_invisible_but_kept() {
        let repo = InMemoryCoupleRepository::new();
        repo.register(couple()).await.unwrap();
        repo.close(&IdFixtures::case_id()).await.unwrap();

        assert!(!repo.exists(&IdFixtures::case_id()).await.unwrap());
        assert_eq!(
            repo.find_by_case_id(&IdFixtures::case_id()).await.unwrap(),
            None
        );
        // closing again still finds the (closed) record
        repo.close(&IdFixtures::case_id()).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_case_is_not_found() {
        let repo = InMemoryCoupleRepository::new();
        let err = repo.update(couple()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
