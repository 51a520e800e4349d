//! In-memory child store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{CaseId, PortError};
use domain_pnc::ports::ChildRepository;
use domain_pnc::Child;

/// `ChildRepository` backed by a lock-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryChildRepository {
    children: RwLock<HashMap<CaseId, Child>>,
}

impl InMemoryChildRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChildRepository for InMemoryChildRepository {
    async fn find_by_case_id(&self, case_id: &CaseId) -> Result<Option<Child>, PortError> {
        Ok(self
            .children
            .read()
            .await
            .get(case_id)
            .filter(|child| child.is_active())
            .cloned())
    }

    async fn exists(&self, case_id: &CaseId) -> Result<bool, PortError> {
        Ok(self
            .children
            .read()
            .await
            .get(case_id)
            .is_some_and(Child::is_active))
    }

    async fn register(&self, child: Child) -> Result<(), PortError> {
        debug!(case_id = %child.case_id, "registering child");
        let mut children = self.children.write().await;
        if children.contains_key(&child.case_id) {
            return Err(PortError::conflict(format!(
                "child {} already registered",
                child.case_id
            )));
        }
        children.insert(child.case_id.clone(), child);
        Ok(())
    }

    async fn update(&self, child: Child) -> Result<(), PortError> {
        let mut children = self.children.write().await;
        if !children.contains_key(&child.case_id) {
            return Err(PortError::not_found("Child", &child.case_id));
        }
        children.insert(child.case_id.clone(), child);
        Ok(())
    }

    async fn update_details(
        &self,
        case_id: &CaseId,
        details: &HashMap<String, String>,
    ) -> Result<Child, PortError> {
        let mut children = self.children.write().await;
        let child = children
            .get(case_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Child", case_id))?
            .with_merged_details(details);
        children.insert(case_id.clone(), child.clone());
        Ok(child)
    }

    async fn close(&self, case_id: &CaseId) -> Result<(), PortError> {
        debug!(case_id = %case_id, "closing child case");
        let mut children = self.children.write().await;
        let child = children
            .get_mut(case_id)
            .ok_or_else(|| PortError::not_found("Child", case_id))?;
        child.close();
        Ok(())
    }
}
