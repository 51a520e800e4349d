//! In-memory mother store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{CaseId, PortError};
use domain_anc::ports::MotherRepository;
use domain_anc::Mother;

/// `MotherRepository` backed by a lock-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryMotherRepository {
    mothers: RwLock<HashMap<CaseId, Mother>>,
}

impl InMemoryMotherRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MotherRepository for InMemoryMotherRepository {
    async fn find_by_case_id(&self, case_id: &CaseId) -> Result<Option<Mother>, PortError> {
        Ok(self
            .mothers
            .read()
            .await
            .get(case_id)
            .filter(|mother| mother.is_active())
            .cloned())
    }

    async fn exists(&self, case_id: &CaseId) -> Result<bool, PortError> {
        Ok(self
            .mothers
            .read()
            .await
            .get(case_id)
            .is_some_and(Mother::is_active))
    }

    async fn register(&self, mother: Mother) -> Result<(), PortError> {
        debug!(case_id = %mother.case_id, "registering mother");
        let mut mothers = self.mothers.write().await;
        if mothers.contains_key(&mother.case_id) {
            return Err(PortError::conflict(format!(
                "mother {} already registered",
                mother.case_id
            )));
        }
        mothers.insert(mother.case_id.clone(), mother);
        Ok(())
    }

    async fn update(&self, mother: Mother) -> Result<(), PortError> {
        let mut mothers = self.mothers.write().await;
        if !mothers.contains_key(&mother.case_id) {
            return Err(PortError::not_found("Mother", &mother.case_id));
        }
        mothers.insert(mother.case_id.clone(), mother);
        Ok(())
    }

    async fn update_details(
        &self,
        case_id: &CaseId,
        details: &HashMap<String, String>,
    ) -> Result<Mother, PortError> {
        let mut mothers = self.mothers.write().await;
        let mother = mothers
            .get(case_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Mother", case_id))?
            .with_merged_details(details);
        mothers.insert(case_id.clone(), mother.clone());
        Ok(mother)
    }

    async fn close(&self, case_id: &CaseId) -> Result<(), PortError> {
        debug!(case_id = %case_id, "closing mother case");
        let mut mothers = self.mothers.write().await;
        let mother = mothers
            .get_mut(case_id)
            .ok_or_else(|| PortError::not_found("Mother", case_id))?;
        mother.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_model::fields::{self, forms};
    use form_model::FormSubmission;
    use test_utils::fixtures::IdFixtures;

    fn mother() -> Mother {
        let submission = FormSubmission::new(forms::ANC_REGISTRATION, "CASE X", "ANM X")
            .with_field(fields::WIFE_NAME, "Mother 1");
        Mother::from_registration(&submission).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_find() {
        let repo = InMemoryMotherRepository::new();
        repo.register(mother()).await.unwrap();
        assert!(repo.exists(&IdFixtures::case_id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_closed_mother_is_invisible() {
        let repo = InMemoryMotherRepository::new();
        repo.register(mother()).await.unwrap();
        repo.close(&IdFixtures::case_id()).await.unwrap();
        assert_eq!(
            repo.find_by_case_id(&IdFixtures::case_id()).await.unwrap(),
            None
        );
    }
}
