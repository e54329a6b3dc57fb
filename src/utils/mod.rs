//! Utility functions shared across the application.
//!
//! - [`base62`] - Deterministic id-to-code encoding
//! - [`url_guard`] - Target URL validation

pub mod base62;
pub mod url_guard;
