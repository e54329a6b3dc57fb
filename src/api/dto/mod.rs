//! Data Transfer Objects for request/response serialization.
//!
//! Field names follow the public wire contract (camelCase).

pub mod health;
pub mod shorten;
pub mod stats;
