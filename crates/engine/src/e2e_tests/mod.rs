//! End-to-end environment lifecycle tests.
//!
//! These run a fully wired [`App`](crate::App) over the in-memory store, so
//! they exercise the registry, the page loader and the refresh signal
//! together without a network.
//!
//! ```bash
//! cargo test -p flagdeck-engine --lib e2e_tests
//! ```

mod e2e_helpers;

pub use e2e_helpers::*;
