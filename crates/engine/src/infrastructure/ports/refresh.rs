//! Invalidation signal fired after a successful mutation.

/// Tells every derived view (environment list, key counts, permissions) to
/// re-read from the server. Fire-and-forget; never fails.
#[cfg_attr(test, mockall::automock)]
pub trait RefreshPort: Send + Sync {
    fn refresh(&self);
}
