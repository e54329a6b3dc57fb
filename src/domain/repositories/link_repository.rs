//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the durable link store.
///
/// The store is the single source of truth: code uniqueness is enforced by
/// its constraint, and click counting goes through its atomic increment.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link row.
    ///
    /// When `new_link.code` is `None` a provisional row is created; the code
    /// must then be assigned via [`Self::assign_code`] once derived from the
    /// returned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists (the store's
    /// uniqueness constraint is the authoritative guard against races that
    /// slip past the fast-path existence check).
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] on
    /// database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Writes the derived code onto a provisional row.
    ///
    /// Second write of the two-phase auto-code path: the id does not exist
    /// before the first insert, so the encoded code cannot either.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row matches `id`.
    /// Returns [`AppError::Conflict`] on a code collision.
    async fn assign_code(&self, id: i64, code: &str) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Checks whether a short code is already taken.
    ///
    /// Fast-path check used to fail alias creation early with a clear error;
    /// the uniqueness constraint remains the real guard.
    async fn exists_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Atomically increments the click counter for a code.
    ///
    /// Single-statement `click_count = click_count + 1` at the store, never
    /// read-modify-write from application logic, so concurrent resolutions
    /// cannot lose updates.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if a row was updated, `Ok(false)` if the code is unknown.
    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError>;

    /// Checks store connectivity, for health reporting.
    async fn ping(&self) -> bool;
}
