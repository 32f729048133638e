//! Capability checks for environment management
//!
//! The console decides which controls to show (create, edit, delete,
//! reorder) by asking one question: may this actor perform `action` within
//! `project` on these environments? [`PermissionContext`] answers it from
//! the actor's grants, which are passed around explicitly as a value.
//!
//! ## Semantics
//!
//! - An empty project selects the organization-wide grant. A project with
//!   its own grant uses that grant; any other project falls back to the
//!   organization-wide grant.
//! - The grant must list the action. `Action::Unknown` is never listed.
//! - Environment-scoped actions on a grant limited by environment require
//!   every requested id to be in the grant's environment list. An empty id
//!   list asks for the ambient capability and only needs the action.
//! - Ids need not exist. Probing with [`EnvironmentId::new_sentinel`] asks
//!   whether the actor may manage an environment that does not exist yet,
//!   which only unrestricted grants allow.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::value_objects::{Action, EnvironmentId};

/// Grant/deny decision over an actor's permissions.
///
/// Implementations must be pure: the same arguments give the same answer
/// for the lifetime of the value, and nothing panics or errors.
pub trait PermissionEvaluator: Send + Sync {
    fn check(&self, action: Action, project: &str, environments: &[EnvironmentId]) -> bool;

    /// String-typed entry point. Unknown action names are denied.
    fn check_named(&self, action: &str, project: &str, environments: &[EnvironmentId]) -> bool {
        match action.parse::<Action>() {
            Ok(action) => self.check(action, project, environments),
            Err(_) => false,
        }
    }

    /// May the actor see environment management controls at all.
    fn can_manage_environments(&self) -> bool {
        self.check(Action::ManageEnvironments, "", &[])
    }

    /// May the actor create a new environment.
    fn can_create_environment(&self) -> bool {
        self.check(
            Action::ManageEnvironments,
            "",
            &[EnvironmentId::new_sentinel()],
        )
    }

    /// May the actor edit or delete this specific environment.
    fn can_edit_environment(&self, id: &EnvironmentId) -> bool {
        self.check(Action::ManageEnvironments, "", std::slice::from_ref(id))
    }
}

/// One role binding: what it allows and where.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleGrant {
    #[serde(default)]
    pub permissions: BTreeSet<Action>,
    /// When set, environment-scoped actions only reach `environments`.
    #[serde(default)]
    pub limit_access_by_environment: bool,
    #[serde(default)]
    pub environments: Vec<String>,
}

impl RoleGrant {
    pub fn new(permissions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            permissions: permissions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Restrict environment-scoped actions to the given environments.
    pub fn limited_to<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.limit_access_by_environment = true;
        self.environments = environments.into_iter().map(Into::into).collect();
        self
    }

    fn allows(&self, action: Action, environments: &[EnvironmentId]) -> bool {
        if action == Action::Unknown || !self.permissions.contains(&action) {
            return false;
        }
        if !action.is_environment_scoped() || !self.limit_access_by_environment {
            return true;
        }
        environments
            .iter()
            .all(|id| self.environments.iter().any(|allowed| id == allowed.as_str()))
    }
}

/// The acting user's grants: one organization-wide, plus per-project overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionContext {
    #[serde(default)]
    pub global: RoleGrant,
    #[serde(default)]
    pub projects: BTreeMap<String, RoleGrant>,
}

impl PermissionContext {
    pub fn new(global: RoleGrant) -> Self {
        Self {
            global,
            projects: BTreeMap::new(),
        }
    }

    /// Context that grants nothing.
    pub fn deny_all() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: impl Into<String>, grant: RoleGrant) -> Self {
        self.projects.insert(project.into(), grant);
        self
    }

    fn grant_for(&self, project: &str) -> &RoleGrant {
        if project.is_empty() {
            return &self.global;
        }
        self.projects.get(project).unwrap_or(&self.global)
    }
}

impl PermissionEvaluator for PermissionContext {
    fn check(&self, action: Action, project: &str, environments: &[EnvironmentId]) -> bool {
        self.grant_for(project).allows(action, environments)
    }
}
