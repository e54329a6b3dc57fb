//! Target URL validation.
//!
//! The stored URL is kept byte-for-byte as submitted; validation only rejects
//! inputs the service must not redirect to.

use url::Url;

/// Maximum accepted target URL length, matching the column width.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur while validating a target URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL exceeds the maximum length of {MAX_URL_LENGTH} characters")]
    TooLong,
}

/// Validates a target URL without altering it.
///
/// Rejects malformed URLs, non-HTTP(S) schemes (`javascript:`, `data:`,
/// `file:`, ...), and URLs longer than [`MAX_URL_LENGTH`].
pub fn validate_target_url(input: &str) -> Result<(), UrlValidationError> {
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(UrlValidationError::UnsupportedProtocol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_target_url("http://example.com").is_ok());
        assert!(validate_target_url("https://example.com/x?q=1#frag").is_ok());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            validate_target_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for input in [
            "javascript:alert(1)",
            "data:text/html,<script>",
            "file:///etc/passwd",
            "ftp://example.com/file",
        ] {
            assert!(matches!(
                validate_target_url(input),
                Err(UrlValidationError::UnsupportedProtocol)
            ));
        }
    }

    #[test]
    fn test_rejects_overlong() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            validate_target_url(&long),
            Err(UrlValidationError::TooLong)
        ));
    }
}
