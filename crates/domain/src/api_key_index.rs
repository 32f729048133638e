//! Per-environment API key counts
//!
//! Built from the flat key listing. Environment strings on keys are matched
//! case-insensitively against environment ids, so `Production` and
//! `production` land in one bucket. The index is rebuilt whenever the key
//! list changes; it is never patched incrementally.

use std::collections::HashMap;

use crate::aggregates::EnvironmentList;
use crate::entities::ApiKey;
use crate::value_objects::EnvironmentId;

/// Lowercased environment id → number of keys referencing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeyIndex {
    counts: HashMap<String, usize>,
}

impl ApiKeyIndex {
    /// Count keys per environment. Org-wide keys (no environment) are skipped.
    pub fn build(keys: &[ApiKey]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for environment in keys.iter().filter_map(|k| k.environment.as_deref()) {
            *counts.entry(environment.to_lowercase()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Keys associated with `id`, ignoring case. Unknown ids count 0.
    pub fn count_for(&self, id: &EnvironmentId) -> usize {
        self.count_for_name(id.as_str())
    }

    /// Same as [`count_for`](Self::count_for) for a raw environment string.
    pub fn count_for_name(&self, environment: &str) -> usize {
        self.counts
            .get(&environment.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct buckets.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Buckets in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Buckets whose environment matches nothing in `environments`.
    ///
    /// These are valid (keys may outlive a deleted environment) and are not
    /// reconciled here; this only lists them, sorted by name.
    pub fn orphans(&self, environments: &EnvironmentList) -> Vec<(&str, usize)> {
        let known: Vec<String> = environments.iter().map(|e| e.id().lookup_key()).collect();
        let mut orphans: Vec<(&str, usize)> = self
            .iter()
            .filter(|(name, _)| !known.iter().any(|k| k == name))
            .collect();
        orphans.sort_unstable_by(|a, b| a.0.cmp(b.0));
        orphans
    }
}
