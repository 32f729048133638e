//! In-memory organization store.
//!
//! Implements the settings and key ports over a `HashMap`. Organizations are
//! created on first write; reading an unknown organization is `NotFound`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use flagdeck_domain::{ApiKey, Environment, OrganizationId};

use crate::infrastructure::ports::{ApiKeyRepo, OrganizationSettingsRepo, RepoError};

#[derive(Debug, Clone, Default)]
struct OrganizationRecord {
    environments: Vec<Environment>,
    keys: Vec<ApiKey>,
}

#[derive(Debug, Default)]
pub struct InMemoryOrganizationStore {
    organizations: RwLock<HashMap<OrganizationId, OrganizationRecord>>,
    replace_calls: AtomicUsize,
}

impl InMemoryOrganizationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an organization's environments without counting as a replace call.
    pub async fn seed_environments(&self, organization: &OrganizationId, environments: Vec<Environment>) {
        let mut orgs = self.organizations.write().await;
        orgs.entry(organization.clone()).or_default().environments = environments;
    }

    pub async fn seed_keys(&self, organization: &OrganizationId, keys: Vec<ApiKey>) {
        let mut orgs = self.organizations.write().await;
        orgs.entry(organization.clone()).or_default().keys = keys;
    }

    /// Number of `replace_environments` calls received so far.
    pub fn replace_calls(&self) -> usize {
        self.replace_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrganizationSettingsRepo for InMemoryOrganizationStore {
    async fn get_environments(
        &self,
        organization: &OrganizationId,
    ) -> Result<Vec<Environment>, RepoError> {
        let orgs = self.organizations.read().await;
        orgs.get(organization)
            .map(|record| record.environments.clone())
            .ok_or_else(|| RepoError::not_found("Organization", organization))
    }

    async fn replace_environments(
        &self,
        organization: &OrganizationId,
        environments: &[Environment],
    ) -> Result<(), RepoError> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        let mut orgs = self.organizations.write().await;
        orgs.entry(organization.clone()).or_default().environments = environments.to_vec();
        Ok(())
    }
}

#[async_trait]
impl ApiKeyRepo for InMemoryOrganizationStore {
    async fn list_keys(&self, organization: &OrganizationId) -> Result<Vec<ApiKey>, RepoError> {
        let orgs = self.organizations.read().await;
        orgs.get(organization)
            .map(|record| record.keys.clone())
            .ok_or_else(|| RepoError::not_found("Organization", organization))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagdeck_domain::EnvironmentId;

    fn org(s: &str) -> OrganizationId {
        OrganizationId::new(s).expect("valid org id")
    }

    #[tokio::test]
    async fn unknown_organization_is_not_found() {
        let store = InMemoryOrganizationStore::new();
        let err = store
            .get_environments(&org("org_missing"))
            .await
            .expect_err("missing");
        assert!(err.is_not_found());
        assert!(store.list_keys(&org("org_missing")).await.is_err());
    }

    #[tokio::test]
    async fn replace_overwrites_whole_list_per_organization() {
        let store = InMemoryOrganizationStore::new();
        let a = org("org_a");
        let b = org("org_b");
        store
            .seed_environments(&a, vec![Environment::new(EnvironmentId::from_stored("dev"))])
            .await;
        store
            .seed_environments(&b, vec![Environment::new(EnvironmentId::from_stored("prod"))])
            .await;

        let replacement = vec![
            Environment::new(EnvironmentId::from_stored("x")),
            Environment::new(EnvironmentId::from_stored("y")),
        ];
        store
            .replace_environments(&a, &replacement)
            .await
            .expect("replaced");

        assert_eq!(store.get_environments(&a).await.expect("a"), replacement);
        assert_eq!(store.get_environments(&b).await.expect("b").len(), 1);
        assert_eq!(store.replace_calls(), 1);
    }
}
