//! Repository port traits for the organization API.

use async_trait::async_trait;
use flagdeck_domain::{ApiKey, Environment, OrganizationId};

use super::error::RepoError;

// =============================================================================
// Organization Settings
// =============================================================================

/// Storage for an organization's `settings.environments` list.
///
/// Writes are full replacements. There is no partial update and no version
/// token: whatever is written last wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationSettingsRepo: Send + Sync {
    async fn get_environments(
        &self,
        organization: &OrganizationId,
    ) -> Result<Vec<Environment>, RepoError>;

    async fn replace_environments(
        &self,
        organization: &OrganizationId,
        environments: &[Environment],
    ) -> Result<(), RepoError>;
}

// =============================================================================
// API Keys
// =============================================================================

/// Read-only listing of already-issued API keys.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiKeyRepo: Send + Sync {
    async fn list_keys(&self, organization: &OrganizationId) -> Result<Vec<ApiKey>, RepoError>;
}
