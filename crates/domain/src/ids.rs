use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of the organization that owns an environment list.
///
/// Organization ids are issued by the remote console (e.g. `org_sktwi1id9l7z9xkjb`)
/// and are opaque here; only emptiness and surrounding whitespace are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrganizationId(String);

impl OrganizationId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Organization id cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for OrganizationId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<OrganizationId> for String {
    fn from(id: OrganizationId) -> String {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let id = OrganizationId::new("  org_abc ").expect("valid id");
        assert_eq!(id.as_str(), "org_abc");
    }

    #[test]
    fn rejects_blank() {
        assert!(OrganizationId::new("   ").is_err());
    }

    #[test]
    fn deserialize_validates() {
        let err = serde_json::from_str::<OrganizationId>("\"\"");
        assert!(err.is_err());
    }
}
