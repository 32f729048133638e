//! Helpers for building an [`App`] over seeded in-memory state.

use std::sync::Arc;

use flagdeck_domain::{
    Action, ApiKey, Environment, EnvironmentId, OrganizationId, PermissionContext, RoleGrant,
};

use crate::app::App;
use crate::infrastructure::memory::InMemoryOrganizationStore;

pub struct TestHarness {
    pub app: App,
    pub store: Arc<InMemoryOrganizationStore>,
}

impl TestHarness {
    pub async fn new(environments: &[&str], keys: Vec<ApiKey>, permissions: PermissionContext) -> Self {
        let organization = OrganizationId::new("org_e2e").expect("valid org id");
        let store = Arc::new(InMemoryOrganizationStore::new());
        store
            .seed_environments(
                &organization,
                environments
                    .iter()
                    .map(|s| Environment::new(EnvironmentId::from_stored(*s)))
                    .collect(),
            )
            .await;
        store.seed_keys(&organization, keys).await;

        let app = App::new(organization, store.clone(), store.clone(), permissions);
        Self { app, store }
    }

    pub async fn admin(environments: &[&str]) -> Self {
        Self::new(environments, Vec::new(), admin_permissions()).await
    }

    /// Current ids in stored order, read through the registry.
    pub async fn ids(&self) -> Vec<String> {
        let list = self.app.registry.list().await.expect("list environments");
        list.ids().map(str::to_string).collect()
    }
}

pub fn admin_permissions() -> PermissionContext {
    PermissionContext::new(RoleGrant::new(Action::ALL))
}
