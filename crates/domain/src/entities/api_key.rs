//! API key record as listed by the console.
//!
//! Read-only here. Only the environment association matters for counting;
//! org-wide keys carry no environment.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub secret: bool,
}

impl ApiKey {
    /// A key scoped to one environment.
    pub fn for_environment(environment: impl Into<String>) -> Self {
        Self {
            environment: Some(environment.into()),
            ..Self::default()
        }
    }

    /// An organization-wide key.
    pub fn org_wide() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_unmodelled_fields() {
        let key: ApiKey = serde_json::from_str(
            r#"{"key":"key_abc","environment":"production","dateCreated":"2022-01-01"}"#,
        )
        .expect("deserializes");
        assert_eq!(key.environment.as_deref(), Some("production"));
        assert!(!key.secret);
    }

    #[test]
    fn missing_environment_is_org_wide() {
        let key: ApiKey = serde_json::from_str(r#"{"secret":true}"#).expect("deserializes");
        assert_eq!(key.environment, None);
        assert_eq!(key, ApiKey { secret: true, ..ApiKey::org_wide() });
    }
}
