//! Application state and composition.

use std::sync::Arc;

use flagdeck_domain::{OrganizationId, PermissionContext};

use crate::infrastructure::{
    config::{AppConfig, ConfigError},
    http_api::HttpOrganizationApi,
    ports::{ApiKeyRepo, OrganizationSettingsRepo},
    refresh::WatchRefresh,
};
use crate::use_cases::{EnvironmentRegistry, LoadEnvironmentsPage};

/// Everything needed to manage one organization's environments.
///
/// The permission context is held as a value and handed to the page loader
/// explicitly; nothing reads it from global state.
pub struct App {
    pub organization: OrganizationId,
    pub registry: EnvironmentRegistry,
    pub page: LoadEnvironmentsPage,
    pub refresh: Arc<WatchRefresh>,
    pub permissions: PermissionContext,
}

impl App {
    /// Wire use cases over the given ports.
    pub fn new(
        organization: OrganizationId,
        settings: Arc<dyn OrganizationSettingsRepo>,
        keys: Arc<dyn ApiKeyRepo>,
        permissions: PermissionContext,
    ) -> Self {
        let refresh = Arc::new(WatchRefresh::new());
        let registry =
            EnvironmentRegistry::new(organization.clone(), settings.clone(), refresh.clone());
        let page = LoadEnvironmentsPage::new(organization.clone(), settings, keys);

        Self {
            organization,
            registry,
            page,
            refresh,
            permissions,
        }
    }

    /// Wire against the remote API described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let organization = config.organization_id()?;
        let permissions = config.load_permissions()?;
        let api = Arc::new(HttpOrganizationApi::with_timeout(
            &config.api_url,
            config.api_token.clone(),
            config.http_timeout_secs,
        ));

        tracing::info!(
            organization = %organization,
            api_url = %api.base_url(),
            "Configured organization API"
        );

        Ok(Self::new(organization, api.clone(), api, permissions))
    }
}
