//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without infrastructure concerns.
//! Creation input uses a separate `NewLink` struct following the "new type"
//! pattern.

pub mod link;

pub use link::{Link, NewLink};
