//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Organization settings storage (HTTP API, in-memory)
//! - API key listing
//! - Refresh/invalidation signalling

mod error;
mod refresh;
mod repos;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{ApiKeyRepo, OrganizationSettingsRepo};

// =============================================================================
// Signal Ports
// =============================================================================
pub use refresh::RefreshPort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockApiKeyRepo, MockOrganizationSettingsRepo};

#[cfg(test)]
pub use refresh::MockRefreshPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
