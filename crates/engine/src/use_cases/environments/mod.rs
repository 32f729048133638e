//! Environment management use cases.
//!
//! - `registry` - create/update/delete/reorder, each a full-list replace
//! - `page` - the environments page model: rows, key counts, gated controls

mod page;
mod registry;

pub use page::{EnvironmentControl, EnvironmentRow, EnvironmentsPage, LoadEnvironmentsPage, RowControls};
pub use registry::{EnvironmentRegistry, NewEnvironment};

use flagdeck_domain::{DomainError, Environment, EnvironmentList};

use crate::infrastructure::ports::RepoError;

/// Shared error type for environment use cases.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    #[error("Environment already exists: {0}")]
    Conflict(String),
    #[error("Environment not found: {0}")]
    NotFound(String),
    #[error("Invariant violated: {0}")]
    Invariant(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Stored environments are invalid: {0}")]
    InvalidStoredList(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for EnvironmentError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Conflict { id, .. } => Self::Conflict(id),
            DomainError::NotFound { id, .. } => Self::NotFound(id),
            DomainError::Constraint(msg) => Self::Invariant(msg),
            DomainError::Validation(msg) | DomainError::Parse(msg) => Self::InvalidInput(msg),
        }
    }
}

/// Build the aggregate from what the store returned.
///
/// A stored list that breaks the aggregate's rules is reported as
/// `InvalidStoredList`, never as a rejected create.
pub(crate) fn stored_list(
    environments: Vec<Environment>,
) -> Result<EnvironmentList, EnvironmentError> {
    EnvironmentList::new(environments).map_err(|err| {
        let detail = match err {
            DomainError::Conflict { id, .. } => format!("duplicate id {}", id),
            DomainError::Validation(msg) => msg,
            other => other.to_string(),
        };
        EnvironmentError::InvalidStoredList(detail)
    })
}
