//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome enums from mutations where "nothing happened" is a valid result

pub mod environment_list;

pub use environment_list::EnvironmentList;
