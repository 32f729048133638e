//! EnvironmentList aggregate - the ordered environments of one organization
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: the `Vec` is only reachable through methods
//! - **Valid by construction**: ids are unique from `new()` onwards
//! - **Position is order**: no rank field exists to drift out of sync
//! - **Outcomes**: moves return [`EnvironmentMove`] instead of `bool`
//!
//! Every mutation here works on an owned copy; the settings store only ever
//! receives the whole resulting list.

use serde::{Deserialize, Serialize};

use crate::entities::{Environment, EnvironmentPatch};
use crate::error::DomainError;
use crate::events::EnvironmentMove;
use crate::value_objects::EnvironmentId;

const ENTITY: &str = "Environment";

/// Ordered, id-unique list of environments.
///
/// # Invariants
///
/// - No two entries share an id (case-sensitive comparison)
/// - No entry carries the `$$$NEW$$$` sentinel id
/// - Once non-empty, `remove` never empties the list
///
/// # Example
///
/// ```
/// use flagdeck_domain::{Environment, EnvironmentId, EnvironmentList};
///
/// let mut list = EnvironmentList::default();
/// list.create(Environment::new(EnvironmentId::new("production").unwrap())).unwrap();
/// list.create(Environment::new(EnvironmentId::new("staging").unwrap())).unwrap();
///
/// list.move_down(0);
/// assert_eq!(list.ids().collect::<Vec<_>>(), vec!["staging", "production"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Environment>", into = "Vec<Environment>")]
pub struct EnvironmentList {
    environments: Vec<Environment>,
}

impl EnvironmentList {
    /// Build a list, rejecting duplicate and reserved ids.
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation` if an entry uses the sentinel id
    /// - `DomainError::Conflict` naming the first repeated id
    pub fn new(environments: Vec<Environment>) -> Result<Self, DomainError> {
        if environments.iter().any(|env| env.id().is_sentinel()) {
            return Err(DomainError::validation(format!(
                "Environment id {} is reserved",
                EnvironmentId::NEW_SENTINEL
            )));
        }
        for (i, env) in environments.iter().enumerate() {
            if environments[..i].iter().any(|prev| prev.id() == env.id()) {
                return Err(DomainError::conflict(ENTITY, env.id().as_str()));
            }
        }
        Ok(Self { environments })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.environments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Environment> {
        self.environments.iter()
    }

    pub fn as_slice(&self) -> &[Environment] {
        &self.environments
    }

    pub fn into_vec(self) -> Vec<Environment> {
        self.environments
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.environments.iter().map(|e| e.id().as_str())
    }

    pub fn get(&self, id: &EnvironmentId) -> Option<&Environment> {
        self.environments.iter().find(|e| e.id() == id)
    }

    pub fn position(&self, id: &EnvironmentId) -> Option<usize> {
        self.environments.iter().position(|e| e.id() == id)
    }

    pub fn contains(&self, id: &EnvironmentId) -> bool {
        self.position(id).is_some()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a new environment at the end.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Conflict` if the id is already taken. The list is
    /// left unchanged.
    pub fn create(&mut self, environment: Environment) -> Result<(), DomainError> {
        if self.contains(environment.id()) {
            return Err(DomainError::conflict(ENTITY, environment.id().as_str()));
        }
        self.environments.push(environment);
        Ok(())
    }

    /// Patch an environment in place, keeping its position.
    pub fn update(
        &mut self,
        id: &EnvironmentId,
        patch: EnvironmentPatch,
    ) -> Result<&Environment, DomainError> {
        let index = self
            .position(id)
            .ok_or_else(|| DomainError::not_found(ENTITY, id.as_str()))?;
        let environment = &mut self.environments[index];
        environment.apply(patch);
        Ok(environment)
    }

    /// Remove an environment.
    ///
    /// # Errors
    ///
    /// - `DomainError::NotFound` if no environment has this id
    /// - `DomainError::Constraint` if it is the only environment left
    pub fn remove(&mut self, id: &EnvironmentId) -> Result<Environment, DomainError> {
        let index = self
            .position(id)
            .ok_or_else(|| DomainError::not_found(ENTITY, id.as_str()))?;
        if self.environments.len() == 1 {
            return Err(DomainError::constraint(format!(
                "Cannot delete {}: at least one environment is required",
                id
            )));
        }
        Ok(self.environments.remove(index))
    }

    /// Move the environment at `index` one slot towards the front.
    pub fn move_up(&mut self, index: usize) -> EnvironmentMove {
        if index >= self.environments.len() {
            return EnvironmentMove::OutOfRange {
                index,
                len: self.environments.len(),
            };
        }
        if index == 0 {
            return EnvironmentMove::AtBoundary { index };
        }
        self.relocate(index, index - 1)
    }

    /// Move the environment at `index` one slot towards the back.
    pub fn move_down(&mut self, index: usize) -> EnvironmentMove {
        if index >= self.environments.len() {
            return EnvironmentMove::OutOfRange {
                index,
                len: self.environments.len(),
            };
        }
        if index + 1 == self.environments.len() {
            return EnvironmentMove::AtBoundary { index };
        }
        self.relocate(index, index + 1)
    }

    // Remove-and-reinsert; callers guarantee both indexes are in range.
    fn relocate(&mut self, from: usize, to: usize) -> EnvironmentMove {
        let environment = self.environments.remove(from);
        let id = environment.id().clone();
        self.environments.insert(to, environment);
        EnvironmentMove::Moved { id, from, to }
    }
}

impl TryFrom<Vec<Environment>> for EnvironmentList {
    type Error = DomainError;

    fn try_from(environments: Vec<Environment>) -> Result<Self, Self::Error> {
        Self::new(environments)
    }
}

impl From<EnvironmentList> for Vec<Environment> {
    fn from(list: EnvironmentList) -> Self {
        list.environments
    }
}

impl<'a> IntoIterator for &'a EnvironmentList {
    type Item = &'a Environment;
    type IntoIter = std::slice::Iter<'a, Environment>;

    fn into_iter(self) -> Self::IntoIter {
        self.environments.iter()
    }
}
