//! Value objects - Immutable objects defined by their attributes

mod action;
mod environment_id;

pub use action::Action;
pub use environment_id::EnvironmentId;
