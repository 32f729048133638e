//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The remote API answered with a non-success status.
    #[error("Remote error in {operation}: HTTP {status}: {message}")]
    Remote {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// The request never got a response (connect, timeout, TLS).
    #[error("Transport error in {operation}: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Remote error with operation and status context.
    pub fn remote(operation: &'static str, status: u16, message: impl ToString) -> Self {
        Self::Remote {
            operation,
            status,
            message: message.to_string(),
        }
    }

    /// Create a Transport error with operation context.
    pub fn transport(operation: &'static str, message: impl ToString) -> Self {
        Self::Transport {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
