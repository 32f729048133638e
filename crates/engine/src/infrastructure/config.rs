//! Runtime configuration from environment variables.
//!
//! Supported variables (a `.env` file is loaded first when present):
//! - `FLAGDECK_API_URL` - API base URL (default `http://localhost:3100`)
//! - `FLAGDECK_API_TOKEN` - bearer token
//! - `FLAGDECK_ORGANIZATION` - organization id to operate on
//! - `FLAGDECK_HTTP_TIMEOUT_SECS` - request timeout, 1-600 (default 30)
//! - `FLAGDECK_PERMISSIONS_FILE` - JSON `PermissionContext`; absent means deny all

use std::path::{Path, PathBuf};

use flagdeck_domain::{OrganizationId, PermissionContext};

use crate::infrastructure::http_api::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No organization configured; set FLAGDECK_ORGANIZATION or pass --organization")]
    MissingOrganization,
    #[error("Invalid organization id: {0}")]
    InvalidOrganization(String),
    #[error("Failed to read permissions file {path}: {source}")]
    PermissionsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse permissions file {path}: {source}")]
    PermissionsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub organization: Option<String>,
    pub http_timeout_secs: u64,
    pub permissions_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            organization: None,
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
            permissions_file: None,
        }
    }
}

impl AppConfig {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let http_timeout_secs = match get("FLAGDECK_HTTP_TIMEOUT_SECS") {
            Some(val) => match val.trim().parse::<u64>() {
                Ok(secs) if (1..=600).contains(&secs) => secs,
                Ok(secs) => {
                    tracing::warn!(
                        secs,
                        "FLAGDECK_HTTP_TIMEOUT_SECS out of range [1, 600], ignoring"
                    );
                    defaults.http_timeout_secs
                }
                Err(_) => {
                    tracing::warn!(
                        val = %val,
                        "FLAGDECK_HTTP_TIMEOUT_SECS is not a valid u64, ignoring"
                    );
                    defaults.http_timeout_secs
                }
            },
            None => defaults.http_timeout_secs,
        };

        Self {
            api_url: get("FLAGDECK_API_URL").unwrap_or(defaults.api_url),
            api_token: get("FLAGDECK_API_TOKEN"),
            organization: get("FLAGDECK_ORGANIZATION"),
            http_timeout_secs,
            permissions_file: get("FLAGDECK_PERMISSIONS_FILE").map(PathBuf::from),
        }
    }

    pub fn organization_id(&self) -> Result<OrganizationId, ConfigError> {
        let raw = self
            .organization
            .as_deref()
            .ok_or(ConfigError::MissingOrganization)?;
        OrganizationId::new(raw).map_err(|_| ConfigError::InvalidOrganization(raw.to_string()))
    }

    /// The acting user's permissions. Without a file nothing is granted.
    pub fn load_permissions(&self) -> Result<PermissionContext, ConfigError> {
        match &self.permissions_file {
            Some(path) => read_permissions(path),
            None => {
                tracing::warn!("No permissions file configured, all management actions are denied");
                Ok(PermissionContext::deny_all())
            }
        }
    }
}

fn read_permissions(path: &Path) -> Result<PermissionContext, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::PermissionsRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::PermissionsParse {
        path: path.to_path_buf(),
        source,
    })
}
