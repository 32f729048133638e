//! Organization API client
//!
//! Talks to the console's REST API:
//! - `GET  /organization` → `{ "organization": { "settings": { "environments": [...] } } }`
//! - `PUT  /organization` ← `{ "settings": { "environments": [...] } }` (full replace)
//! - `GET  /keys`         → `{ "keys": [...] }`
//!
//! Requests carry a bearer token and the `X-Organization` header.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use flagdeck_domain::{ApiKey, Environment, OrganizationId};

use crate::infrastructure::ports::{ApiKeyRepo, OrganizationSettingsRepo, RepoError};

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3100";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ORGANIZATION_HEADER: &str = "X-Organization";

/// Client for the console's organization and key endpoints.
#[derive(Clone)]
pub struct HttpOrganizationApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpOrganizationApi {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT_SECS)
    }

    /// Create client with custom timeout.
    pub fn with_timeout(base_url: &str, token: Option<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, organization: &OrganizationId) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(ORGANIZATION_HEADER, organization.as_str());
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, RepoError> {
        let response = request
            .send()
            .await
            .map_err(|e| RepoError::transport(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| RepoError::transport(operation, e))?;
            return Err(RepoError::remote(operation, status.as_u16(), error_message(&body)));
        }

        Ok(response)
    }
}

impl Default for HttpOrganizationApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, None)
    }
}

#[async_trait]
impl OrganizationSettingsRepo for HttpOrganizationApi {
    async fn get_environments(
        &self,
        organization: &OrganizationId,
    ) -> Result<Vec<Environment>, RepoError> {
        let request = self.request(Method::GET, "/organization", organization);
        let response = Self::send("get_environments", request).await?;
        let body: OrganizationResponse = response
            .json()
            .await
            .map_err(RepoError::serialization)?;
        Ok(body.organization.settings.environments)
    }

    async fn replace_environments(
        &self,
        organization: &OrganizationId,
        environments: &[Environment],
    ) -> Result<(), RepoError> {
        let request = self
            .request(Method::PUT, "/organization", organization)
            .json(&UpdateOrganizationRequest::environments(environments));
        Self::send("replace_environments", request).await?;
        Ok(())
    }
}

#[async_trait]
impl ApiKeyRepo for HttpOrganizationApi {
    async fn list_keys(&self, organization: &OrganizationId) -> Result<Vec<ApiKey>, RepoError> {
        let request = self.request(Method::GET, "/keys", organization);
        let response = Self::send("list_keys", request).await?;
        let body: KeysResponse = response
            .json()
            .await
            .map_err(RepoError::serialization)?;
        Ok(body.keys)
    }
}

// Error bodies are `{ "status": 400, "message": "..." }`; fall back to raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.trim().to_string())
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct OrganizationResponse {
    organization: OrganizationBody,
}

#[derive(Debug, Default, Deserialize)]
struct OrganizationBody {
    #[serde(default)]
    settings: SettingsBody,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsBody {
    #[serde(default)]
    environments: Vec<Environment>,
}

#[derive(Debug, Serialize)]
struct UpdateOrganizationRequest<'a> {
    settings: EnvironmentSettings<'a>,
}

impl<'a> UpdateOrganizationRequest<'a> {
    fn environments(environments: &'a [Environment]) -> Self {
        Self {
            settings: EnvironmentSettings { environments },
        }
    }
}

#[derive(Debug, Serialize)]
struct EnvironmentSettings<'a> {
    environments: &'a [Environment],
}

#[derive(Debug, Deserialize)]
struct KeysResponse {
    #[serde(default)]
    keys: Vec<ApiKey>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}
