//! Flagdeck domain: environments, API key counts and permission checks.
//!
//! Pure types only. Nothing here performs I/O; persistence and refresh are
//! ports owned by the engine.

pub mod aggregates;
pub mod api_key_index;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod permissions;
pub mod value_objects;

pub use aggregates::EnvironmentList;
pub use api_key_index::ApiKeyIndex;
pub use entities::{ApiKey, Environment, EnvironmentPatch};
pub use error::DomainError;
pub use events::EnvironmentMove;
pub use ids::OrganizationId;
pub use permissions::{PermissionContext, PermissionEvaluator, RoleGrant};
pub use value_objects::{Action, EnvironmentId};
