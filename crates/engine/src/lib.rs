//! Flagdeck Engine library.
//!
//! Environment management for a feature-flag console.
//!
//! ## Structure
//!
//! - `use_cases/` - Registry and page orchestration over the ports
//! - `infrastructure/` - Port traits and their adapters (HTTP, in-memory, refresh), config
//! - `api/` - Command line entry point
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end lifecycle tests against the in-memory store.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
