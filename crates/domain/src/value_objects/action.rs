//! Capability names checked by the permission evaluator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// A named capability gating a category of mutation.
///
/// The wire form is the console's camelCase permission name. Names this build
/// does not know deserialize to [`Action::Unknown`], which is never granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    ManageEnvironments,
    PublishFeatures,
    RunExperiments,
    ManageFeatures,
    ManageApiKeys,
    ManageProjects,
    OrganizationSettings,
    ManageTeam,

    /// Forward-compatibility fallback for permission names added server-side.
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Every known action, excluding `Unknown`.
    pub const ALL: [Action; 8] = [
        Action::ManageEnvironments,
        Action::PublishFeatures,
        Action::RunExperiments,
        Action::ManageFeatures,
        Action::ManageApiKeys,
        Action::ManageProjects,
        Action::OrganizationSettings,
        Action::ManageTeam,
    ];

    /// Actions whose grant can be narrowed to a subset of environments.
    pub fn is_environment_scoped(&self) -> bool {
        matches!(
            self,
            Action::ManageEnvironments | Action::PublishFeatures | Action::RunExperiments
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ManageEnvironments => "manageEnvironments",
            Action::PublishFeatures => "publishFeatures",
            Action::RunExperiments => "runExperiments",
            Action::ManageFeatures => "manageFeatures",
            Action::ManageApiKeys => "manageApiKeys",
            Action::ManageProjects => "manageProjects",
            Action::OrganizationSettings => "organizationSettings",
            Action::ManageTeam => "manageTeam",
            Action::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown action: {}", s)))
    }
}
