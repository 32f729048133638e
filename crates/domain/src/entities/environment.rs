//! Environment entity - a deployment context feature flags are evaluated in
//!
//! Environments (production, staging, ...) are stored as one ordered list in
//! the organization's settings. Their position in that list is their order;
//! there is no rank field.
//!
//! ## Wire Format
//!
//! ```json
//! { "id": "production", "description": "Live traffic", "defaultState": false, "toggleOnList": true }
//! ```
//!
//! Fields this crate does not model are kept in `extra` and written back on
//! every full-list replace, so saving never strips data another client added.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::value_objects::EnvironmentId;

/// A single environment configuration entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    id: EnvironmentId,
    /// Free text shown next to the id
    #[serde(default)]
    pub description: String,
    /// Whether flags start enabled in this environment; `None` means on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_state: Option<bool>,
    /// Whether the feature list shows a toggle for this environment
    #[serde(default)]
    pub toggle_on_list: bool,
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    extra: Map<String, Value>,
}

impl Environment {
    pub fn new(id: EnvironmentId) -> Self {
        Self {
            id,
            description: String::new(),
            default_state: None,
            toggle_on_list: false,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default_state(mut self, default_state: bool) -> Self {
        self.default_state = Some(default_state);
        self
    }

    pub fn with_toggle_on_list(mut self, toggle_on_list: bool) -> Self {
        self.toggle_on_list = toggle_on_list;
        self
    }

    /// The environment's identity. Immutable once created.
    #[inline]
    pub fn id(&self) -> &EnvironmentId {
        &self.id
    }

    /// Effective default state: only an explicit `false` turns it off.
    pub fn default_state_enabled(&self) -> bool {
        self.default_state != Some(false)
    }

    /// Fields carried through from the store that this crate does not model.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Apply a patch in place. The id is never touched.
    pub fn apply(&mut self, patch: EnvironmentPatch) {
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(default_state) = patch.default_state {
            self.default_state = Some(default_state);
        }
        if let Some(toggle_on_list) = patch.toggle_on_list {
            self.toggle_on_list = toggle_on_list;
        }
    }
}

/// Field changes for an existing environment. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentPatch {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_state: Option<bool>,
    #[serde(default)]
    pub toggle_on_list: Option<bool>,
}

impl EnvironmentPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.default_state.is_none() && self.toggle_on_list.is_none()
    }
}
