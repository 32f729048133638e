//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate ports and domain aggregates to fulfill user stories.

pub mod environments;

// Re-export main types
pub use environments::{
    EnvironmentControl, EnvironmentError, EnvironmentRegistry, EnvironmentRow, EnvironmentsPage,
    LoadEnvironmentsPage, NewEnvironment, RowControls,
};
