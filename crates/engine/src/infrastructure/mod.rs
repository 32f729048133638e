//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config;
pub mod http_api;
pub mod memory;
pub mod ports;
pub mod refresh;
