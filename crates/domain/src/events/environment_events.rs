//! Environment list mutation outcomes.

use crate::value_objects::EnvironmentId;

/// Outcome of moving an environment up or down the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentMove {
    /// The environment now sits at `to`; the list changed.
    Moved {
        id: EnvironmentId,
        from: usize,
        to: usize,
    },
    /// Already first (moving up) or last (moving down); list unchanged.
    AtBoundary { index: usize },
    /// No environment at `index`; list unchanged.
    OutOfRange { index: usize, len: usize },
}

impl EnvironmentMove {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}
