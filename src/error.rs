//! Error types for headshot generation.

use std::time::Duration;

/// Errors that can occur while encoding an upload or generating a headshot.
#[derive(Debug, thiserror::Error)]
pub enum HeadshotError {
    /// API key missing or invalid.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Sanitized provider error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Provider-suggested wait before re-invoking, if it sent one.
        retry_after: Option<Duration>,
    },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Invalid request parameters (bad upload, unsupported format).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 or data-URL content.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// Provider answered, but not with anything usable.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// I/O error (e.g., reading the upload or saving the result).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for headshot operations.
pub type Result<T> = std::result::Result<T, HeadshotError>;

/// Maximum length of a provider error message after sanitizing.
const MAX_ERROR_LEN: usize = 400;

/// Reduces a raw provider error body to a single readable line.
///
/// Providers wrap messages in JSON envelopes (`{"error": {"message": ...}}`)
/// and pad them with newlines; the session surfaces these strings directly
/// to the user, so they are unwrapped, whitespace-collapsed, and capped.
pub(crate) fn sanitize_error_message(body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.to_string());

    let mut flat = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.is_empty() {
        flat = "provider returned an empty error body".to_string();
    }
    if flat.len() > MAX_ERROR_LEN {
        let mut end = MAX_ERROR_LEN;
        while !flat.is_char_boundary(end) {
            end -= 1;
        }
        flat.truncate(end);
        flat.push_str("...");
    }
    flat
}

/// Parses a `Retry-After` header value as whole seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HeadshotError::Api {
            status: 404,
            message: "Not found".into(),
        };
        assert_eq!(err.to_string(), "API error: 404 - Not found");

        let err = HeadshotError::ContentBlocked("Safety filter triggered".into());
        assert_eq!(err.to_string(), "content blocked: Safety filter triggered");

        let err = HeadshotError::InvalidRequest("unsupported image format".into());
        assert_eq!(err.to_string(), "invalid request: unsupported image format");
    }

    #[test]
    fn test_sanitize_unwraps_json_envelope() {
        let body = r#"{"error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(sanitize_error_message(body), "Resource exhausted");
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(
            sanitize_error_message("quota\n   exceeded\t for today"),
            "quota exceeded for today"
        );
    }

    #[test]
    fn test_sanitize_plain_text_passthrough() {
        assert_eq!(sanitize_error_message("quota exceeded"), "quota exceeded");
    }

    #[test]
    fn test_sanitize_empty_body() {
        assert_eq!(
            sanitize_error_message("   "),
            "provider returned an empty error body"
        );
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "x".repeat(2 * MAX_ERROR_LEN);
        let sanitized = sanitize_error_message(&long);
        assert!(sanitized.len() <= MAX_ERROR_LEN + 3);
        assert!(sanitized.ends_with("..."));
    }

    #[test]
    fn test_parse_retry_after() {
        let mut headers = reqwest::header::HeaderMap::new();
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert(reqwest::header::RETRY_AFTER, "30".parse().unwrap());
        assert_eq!(parse_retry_after(&headers), Some(30));

        headers.insert(
            reqwest::header::RETRY_AFTER,
            "Wed, 21 Oct 2015 07:28:00 GMT".parse().unwrap(),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }
}
