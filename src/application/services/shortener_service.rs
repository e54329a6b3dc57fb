//! Link creation service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::base62;
use crate::utils::url_guard::validate_target_url;

/// Maximum short code length, matching the column width.
const MAX_CODE_LENGTH: usize = 10;

/// Service for creating shortened links.
///
/// Handles target URL validation, custom alias checking, and the two-phase
/// insert for auto-generated codes. No cache interaction happens at creation
/// time; the cache is populated lazily on first read.
pub struct ShortenerService {
    links: Arc<dyn LinkRepository>,
    base_url: String,
}

impl ShortenerService {
    /// Creates a new shortener service.
    ///
    /// `base_url` is the externally configured public prefix for short URLs.
    pub fn new(links: Arc<dyn LinkRepository>, base_url: String) -> Self {
        Self {
            links,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `target_url` - The original URL to shorten (http/https, ≤ 2048 chars)
    /// - `custom_alias` - Optional caller-chosen code; empty string is
    ///   treated as absent
    /// - `expires_in_hours` - Optional expiry; non-positive values are
    ///   treated as "never expires"
    ///
    /// # Write pattern
    ///
    /// With an alias this is a single insert. Without one, a provisional row
    /// is inserted to obtain the store-assigned id, then the base62-encoded
    /// code is written onto the same row: the code cannot exist before the id
    /// does.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL or alias, and
    /// [`AppError::Conflict`] when the alias is taken. The existence
    /// pre-check fails fast; the store's uniqueness constraint closes the
    /// remaining check-then-insert race and maps to the same conflict error.
    pub async fn shorten(
        &self,
        target_url: String,
        custom_alias: Option<String>,
        expires_in_hours: Option<i64>,
    ) -> Result<Link, AppError> {
        validate_target_url(&target_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let expires_at = expires_in_hours
            .filter(|h| *h > 0)
            .map(|h| Utc::now() + Duration::hours(h));

        let alias = custom_alias.filter(|a| !a.is_empty());

        let link = match alias {
            Some(alias) => {
                validate_alias(&alias)?;

                if self.links.exists_by_code(&alias).await? {
                    return Err(AppError::conflict(
                        "Custom alias already in use",
                        json!({ "alias": alias }),
                    ));
                }

                self.links
                    .create(NewLink {
                        code: Some(alias),
                        target_url,
                        expires_at,
                    })
                    .await?
            }
            None => {
                let provisional = self
                    .links
                    .create(NewLink {
                        code: None,
                        target_url,
                        expires_at,
                    })
                    .await?;

                let code = base62::encode(provisional.id as u64);
                self.links.assign_code(provisional.id, &code).await?
            }
        };

        tracing::info!("Created short link: {} -> {}", link.code, link.target_url);

        Ok(link)
    }

    /// Constructs the resolvable public form of a short code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}

/// Validates a caller-supplied alias: 1-10 characters from the base62
/// alphabet, so aliases live in the same namespace as generated codes.
fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.len() > MAX_CODE_LENGTH {
        return Err(AppError::bad_request(
            "Custom alias must be at most 10 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !base62::is_valid(alias) {
        return Err(AppError::bad_request(
            "Custom alias can only contain 0-9, a-z, A-Z",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::{DateTime, Utc};

    fn make_link(
        id: i64,
        code: &str,
        url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Link {
        Link::new(id, code.to_string(), url.to_string(), 0, Utc::now(), expires_at)
    }

    fn service(repo: MockLinkRepository) -> ShortenerService {
        ShortenerService::new(Arc::new(repo), "https://sho.rt/".to_string())
    }

    #[tokio::test]
    async fn test_auto_code_uses_two_phase_insert() {
        let mut repo = MockLinkRepository::new();

        repo.expect_create()
            .withf(|new_link| new_link.code.is_none())
            .times(1)
            .returning(|nl| Ok(make_link(125, "", &nl.target_url, nl.expires_at)));

        // 125 = 2*62 + 1 -> "21"
        repo.expect_assign_code()
            .withf(|id, code| *id == 125 && code == "21")
            .times(1)
            .returning(|id, code| Ok(make_link(id, code, "https://example.com", None)));

        let result = service(repo)
            .shorten("https://example.com".to_string(), None, None)
            .await;

        assert_eq!(result.unwrap().code, "21");
    }

    #[tokio::test]
    async fn test_custom_alias_single_insert() {
        let mut repo = MockLinkRepository::new();

        repo.expect_exists_by_code()
            .withf(|code| code == "promo")
            .times(1)
            .returning(|_| Ok(false));

        repo.expect_create()
            .withf(|nl| nl.code.as_deref() == Some("promo"))
            .times(1)
            .returning(|nl| {
                Ok(make_link(7, nl.code.as_deref().unwrap(), &nl.target_url, None))
            });

        repo.expect_assign_code().times(0);

        let result = service(repo)
            .shorten(
                "https://example.com".to_string(),
                Some("promo".to_string()),
                None,
            )
            .await;

        assert_eq!(result.unwrap().code, "promo");
    }

    #[tokio::test]
    async fn test_custom_alias_conflict() {
        let mut repo = MockLinkRepository::new();

        repo.expect_exists_by_code().times(1).returning(|_| Ok(true));
        repo.expect_create().times(0);

        let result = service(repo)
            .shorten(
                "https://example.com".to_string(),
                Some("taken".to_string()),
                None,
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_empty_alias_treated_as_absent() {
        let mut repo = MockLinkRepository::new();

        repo.expect_exists_by_code().times(0);
        repo.expect_create()
            .withf(|nl| nl.code.is_none())
            .times(1)
            .returning(|nl| Ok(make_link(1, "", &nl.target_url, None)));
        repo.expect_assign_code()
            .times(1)
            .returning(|id, code| Ok(make_link(id, code, "https://example.com", None)));

        let result = service(repo)
            .shorten("https://example.com".to_string(), Some(String::new()), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_alias_characters() {
        let repo = MockLinkRepository::new();

        let result = service(repo)
            .shorten(
                "https://example.com".to_string(),
                Some("my-alias!".to_string()),
                None,
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_overlong_alias_rejected() {
        let repo = MockLinkRepository::new();

        let result = service(repo)
            .shorten(
                "https://example.com".to_string(),
                Some("a".repeat(11)),
                None,
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let repo = MockLinkRepository::new();

        let result = service(repo)
            .shorten("javascript:alert(1)".to_string(), None, None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_positive_expiry_sets_expires_at() {
        let mut repo = MockLinkRepository::new();

        repo.expect_create()
            .withf(|nl| {
                nl.expires_at
                    .is_some_and(|e| e > Utc::now() + Duration::hours(23))
            })
            .times(1)
            .returning(|nl| Ok(make_link(1, "", &nl.target_url, nl.expires_at)));
        repo.expect_assign_code()
            .times(1)
            .returning(|id, code| Ok(make_link(id, code, "https://example.com", None)));

        let result = service(repo)
            .shorten("https://example.com".to_string(), None, Some(24))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_non_positive_expiry_means_never() {
        for hours in [0i64, -1, -100] {
            let mut repo = MockLinkRepository::new();

            repo.expect_create()
                .withf(|nl| nl.expires_at.is_none())
                .times(1)
                .returning(|nl| Ok(make_link(1, "", &nl.target_url, None)));
            repo.expect_assign_code()
                .times(1)
                .returning(|id, code| Ok(make_link(id, code, "https://example.com", None)));

            let result = service(repo)
                .shorten("https://example.com".to_string(), None, Some(hours))
                .await;

            assert!(result.is_ok(), "hours = {hours}");
        }
    }

    #[test]
    fn test_short_url_joins_base_and_code() {
        let svc = service(MockLinkRepository::new());
        assert_eq!(svc.short_url("abc"), "https://sho.rt/abc");
    }
}
