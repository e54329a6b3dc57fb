//! Domain layer containing business entities and data-access contracts.
//!
//! This layer has no dependencies on infrastructure or presentation code.
//! Business logic lives in [`crate::application::services`]; concrete storage
//! in [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
