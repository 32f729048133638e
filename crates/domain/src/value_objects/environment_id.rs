//! Environment identifier newtype
//!
//! Environment ids are the identity of an environment within an organization.
//! Equality is case-sensitive; matching against API key records goes through
//! [`EnvironmentId::lookup_key`], which lowercases.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for a newly created environment id
const MAX_ENVIRONMENT_ID_LENGTH: usize = 64;

/// A validated environment id (`production`, `staging`, `dev-eu_1`).
///
/// New ids must start with an ASCII letter and contain only ASCII letters,
/// digits, `_` and `-`. `$` is never accepted by [`EnvironmentId::new`].
///
/// Ids loaded from the settings store go through [`EnvironmentId::from_stored`]
/// and are not re-validated, so lists written before validation existed still load.
/// A stored [`EnvironmentId::NEW_SENTINEL`] is refused when the list is built
/// (`EnvironmentList::new`), so no loaded environment shares the create probe's id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EnvironmentId(String);

impl EnvironmentId {
    /// Placeholder id used to ask "may this actor manage an environment that
    /// does not exist yet", i.e. may they create one.
    pub const NEW_SENTINEL: &'static str = "$$$NEW$$$";

    /// Create a new validated environment id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The id is empty after trimming
    /// - The id exceeds 64 characters
    /// - The id does not start with a letter
    /// - The id contains anything other than letters, digits, `_` or `-`
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Environment id cannot be empty"));
        }
        if trimmed.len() > MAX_ENVIRONMENT_ID_LENGTH {
            return Err(DomainError::validation(format!(
                "Environment id cannot exceed {} characters",
                MAX_ENVIRONMENT_ID_LENGTH
            )));
        }
        if !trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(format!(
                "Environment id must start with a letter: {}",
                trimmed
            )));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(DomainError::validation(format!(
                "Environment id contains invalid character '{}': {}",
                bad, trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap an id read back from the settings store without validating it.
    ///
    /// This accepts the sentinel; list construction is where it is refused.
    pub fn from_stored(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The "not yet existing" probe id.
    pub fn new_sentinel() -> Self {
        Self(Self::NEW_SENTINEL.to_string())
    }

    pub fn is_sentinel(&self) -> bool {
        self.0 == Self::NEW_SENTINEL
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used to match API key records.
    pub fn lookup_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for EnvironmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EnvironmentId {
    fn from(s: String) -> Self {
        Self::from_stored(s)
    }
}

impl From<EnvironmentId> for String {
    fn from(id: EnvironmentId) -> String {
        id.0
    }
}

impl PartialEq<str> for EnvironmentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EnvironmentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_ids() {
        for id in ["production", "staging", "dev", "qa-eu_1", "Prod"] {
            assert!(EnvironmentId::new(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn trims_input() {
        let id = EnvironmentId::new("  staging ").expect("valid id");
        assert_eq!(id.as_str(), "staging");
    }

    #[test]
    fn rejects_empty_and_malformed() {
        assert!(EnvironmentId::new("").is_err());
        assert!(EnvironmentId::new("   ").is_err());
        assert!(EnvironmentId::new("1prod").is_err());
        assert!(EnvironmentId::new("prod env").is_err());
        assert!(EnvironmentId::new("a".repeat(65)).is_err());
    }

    #[test]
    fn sentinel_can_never_be_created() {
        assert!(EnvironmentId::new(EnvironmentId::NEW_SENTINEL).is_err());
        assert!(EnvironmentId::new_sentinel().is_sentinel());
    }

    #[test]
    fn identity_is_case_sensitive_but_lookup_is_not() {
        let upper = EnvironmentId::new("PROD").expect("valid id");
        let lower = EnvironmentId::new("prod").expect("valid id");
        assert_ne!(upper, lower);
        assert_eq!(upper.lookup_key(), lower.lookup_key());
    }

    #[test]
    fn stored_ids_deserialize_without_validation() {
        let id: EnvironmentId = serde_json::from_str("\"legacy env\"").expect("deserializes");
        assert_eq!(id, "legacy env");
        assert_eq!(
            serde_json::to_string(&id).expect("serializes"),
            "\"legacy env\""
        );
    }
}
