//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with metadata.
///
/// The `code` is either derived from `id` via base62 encoding or supplied by
/// the caller as a custom alias. Both `code` and `target_url` are immutable
/// after creation; only `click_count` is ever mutated, and only through the
/// repository's atomic increment.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        target_url: String,
        click_count: i64,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            code,
            target_url,
            click_count,
            created_at,
            expires_at,
        }
    }

    /// Returns true if the link has passed its expiry time.
    ///
    /// Expiration is a computed predicate, not a deletion: expired rows stay
    /// in the store and remain visible to stats queries.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry predicate against an explicit instant, for deterministic tests.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}

/// Input data for creating a new link.
///
/// `code` is `None` on the auto-generated path: the row is inserted without a
/// code to obtain the store-assigned id, and the code is written in a second
/// step once it can be derived from that id.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: Option<String>,
    pub target_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link_with_expiry(expires_at: Option<DateTime<Utc>>) -> Link {
        Link::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
            0,
            Utc::now(),
            expires_at,
        )
    }

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
            0,
            now,
            None,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "abc123");
        assert_eq!(link.target_url, "https://example.com");
        assert_eq!(link.click_count, 0);
        assert_eq!(link.created_at, now);
        assert!(!link.is_expired());
    }

    #[test]
    fn test_link_without_expiry_never_expires() {
        let link = link_with_expiry(None);
        assert!(!link.is_expired_at(Utc::now() + Duration::days(365 * 100)));
    }

    #[test]
    fn test_link_is_expired_after_deadline() {
        let link = link_with_expiry(Some(Utc::now() - Duration::seconds(1)));
        assert!(link.is_expired());
    }

    #[test]
    fn test_link_not_expired_before_deadline() {
        let link = link_with_expiry(Some(Utc::now() + Duration::hours(1)));
        assert!(!link.is_expired());
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let deadline = Utc::now();
        let link = link_with_expiry(Some(deadline));
        assert!(link.is_expired_at(deadline));
        assert!(!link.is_expired_at(deadline - Duration::seconds(1)));
    }

    #[test]
    fn test_new_link_provisional_has_no_code() {
        let new_link = NewLink {
            code: None,
            target_url: "https://rust-lang.org".to_string(),
            expires_at: None,
        };

        assert!(new_link.code.is_none());
        assert_eq!(new_link.target_url, "https://rust-lang.org");
    }
}
