//! Environments page model.
//!
//! Combines the environment list, API key counts and the actor's permissions
//! into the rows and controls the management page shows. Nothing here
//! mutates; callers use [`EnvironmentsPage::allows`] to gate registry calls.

use std::sync::Arc;

use serde::Serialize;

use flagdeck_domain::{
    ApiKeyIndex, EnvironmentId, EnvironmentList, OrganizationId, PermissionEvaluator,
};

use super::{stored_list, EnvironmentError};
use crate::infrastructure::ports::{ApiKeyRepo, OrganizationSettingsRepo};

const EMPTY_CAN_CREATE: &str = "Click the button below to add your first environment";
const EMPTY_READ_ONLY: &str = "You don't have any environments defined yet.";

/// Which controls a row exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowControls {
    pub can_edit: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
    pub can_delete: bool,
}

/// One environment as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentRow {
    pub id: EnvironmentId,
    pub description: String,
    /// `"on"` or `"off"`
    pub default_state: &'static str,
    /// `"yes"` or `"no"`
    pub toggle_on_list: &'static str,
    pub api_keys: usize,
    pub controls: RowControls,
}

impl EnvironmentRow {
    pub fn api_keys_label(&self) -> String {
        if self.api_keys == 1 {
            "1 key".to_string()
        } else {
            format!("{} keys", self.api_keys)
        }
    }
}

/// A user action on the page, used to ask whether it is offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentControl {
    Create,
    Edit(EnvironmentId),
    Delete(EnvironmentId),
    MoveUp(EnvironmentId),
    MoveDown(EnvironmentId),
}

/// Everything the environments page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentsPage {
    pub can_create: bool,
    pub can_manage: bool,
    pub rows: Vec<EnvironmentRow>,
    /// Message shown instead of the table when there are no environments
    pub empty_state: Option<&'static str>,
}

impl EnvironmentsPage {
    pub fn build(
        environments: &EnvironmentList,
        keys: &ApiKeyIndex,
        permissions: &dyn PermissionEvaluator,
    ) -> Self {
        let can_create = permissions.can_create_environment();
        let can_manage = permissions.can_manage_environments();
        let last = environments.len().saturating_sub(1);

        let rows: Vec<EnvironmentRow> = environments
            .iter()
            .enumerate()
            .map(|(i, env)| {
                let controls = if can_manage {
                    let can_edit = permissions.can_edit_environment(env.id());
                    RowControls {
                        can_edit,
                        can_move_up: i > 0,
                        can_move_down: i < last,
                        can_delete: environments.len() > 1 && can_edit,
                    }
                } else {
                    RowControls::default()
                };

                EnvironmentRow {
                    id: env.id().clone(),
                    description: env.description.clone(),
                    default_state: if env.default_state_enabled() { "on" } else { "off" },
                    toggle_on_list: if env.toggle_on_list { "yes" } else { "no" },
                    api_keys: keys.count_for(env.id()),
                    controls,
                }
            })
            .collect();

        let empty_state = match (rows.is_empty(), can_create) {
            (false, _) => None,
            (true, true) => Some(EMPTY_CAN_CREATE),
            (true, false) => Some(EMPTY_READ_ONLY),
        };

        Self {
            can_create,
            can_manage,
            rows,
            empty_state,
        }
    }

    pub fn row(&self, id: &EnvironmentId) -> Option<&EnvironmentRow> {
        self.rows.iter().find(|r| &r.id == id)
    }

    pub fn position(&self, id: &EnvironmentId) -> Option<usize> {
        self.rows.iter().position(|r| &r.id == id)
    }

    /// Whether the page offers `control`. Unknown environments offer nothing.
    pub fn allows(&self, control: &EnvironmentControl) -> bool {
        let controls = |id: &EnvironmentId| self.row(id).map(|r| r.controls).unwrap_or_default();
        match control {
            EnvironmentControl::Create => self.can_create,
            EnvironmentControl::Edit(id) => controls(id).can_edit,
            EnvironmentControl::Delete(id) => controls(id).can_delete,
            EnvironmentControl::MoveUp(id) => controls(id).can_move_up,
            EnvironmentControl::MoveDown(id) => controls(id).can_move_down,
        }
    }
}

/// Loads environments and keys for one organization and builds the page.
pub struct LoadEnvironmentsPage {
    organization: OrganizationId,
    settings: Arc<dyn OrganizationSettingsRepo>,
    keys: Arc<dyn ApiKeyRepo>,
}

impl LoadEnvironmentsPage {
    pub fn new(
        organization: OrganizationId,
        settings: Arc<dyn OrganizationSettingsRepo>,
        keys: Arc<dyn ApiKeyRepo>,
    ) -> Self {
        Self {
            organization,
            settings,
            keys,
        }
    }

    pub async fn execute(
        &self,
        permissions: &dyn PermissionEvaluator,
    ) -> Result<EnvironmentsPage, EnvironmentError> {
        let (environments, keys) = tokio::try_join!(
            self.settings.get_environments(&self.organization),
            self.keys.list_keys(&self.organization),
        )?;

        let environments = stored_list(environments)?;
        let index = ApiKeyIndex::build(&keys);

        let orphans = index.orphans(&environments);
        if !orphans.is_empty() {
            tracing::debug!(
                organization = %self.organization,
                orphans = ?orphans,
                "API keys reference environments that no longer exist"
            );
        }

        Ok(EnvironmentsPage::build(&environments, &index, permissions))
    }
}
