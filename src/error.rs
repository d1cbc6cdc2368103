//! Error taxonomy for backend operations

use thiserror::Error;

/// Maximum number of characters of a raw response body carried in error messages
pub const BODY_SNIPPET_CHARS: usize = 200;

/// Errors raised while talking to the generator backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("{0}")]
    Network(String),

    /// Non-2xx response status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Non-2xx response whose body is only worth logging
    #[error("HTTP {0}")]
    Status(u16),

    /// Response body was not the JSON we expected
    #[error("Invalid JSON response: {snippet}...")]
    Parse { snippet: String },

    /// Backend answered with `success: false`
    #[error("{0}")]
    Domain(String),

    /// Export endpoint answered with something other than a spreadsheet
    #[error("Unexpected response format from export endpoint")]
    UnexpectedContentType {
        content_type: Option<String>,
        body: String,
    },

    /// Local filesystem failure while saving an export
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl ApiError {
    /// Build a parse error from the raw body, keeping only a short prefix
    pub fn parse(body: &str) -> Self {
        ApiError::Parse {
            snippet: truncate_chars(body, BODY_SNIPPET_CHARS),
        }
    }

    /// Build an HTTP error from status and raw body
    pub fn http(status: u16, body: &str) -> Self {
        ApiError::Http {
            status,
            body: truncate_chars(body, BODY_SNIPPET_CHARS),
        }
    }
}

/// Take at most `max_chars` characters from `s` without splitting a code point
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_chars("abc", 200), "abc");
    }

    #[test]
    fn test_truncate_long_string() {
        let body = "x".repeat(500);
        assert_eq!(truncate_chars(&body, 200).len(), 200);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let body = "é".repeat(300);
        let truncated = truncate_chars(&body, 200);
        assert_eq!(truncated.chars().count(), 200);
    }

    #[test]
    fn test_parse_error_message_is_truncated() {
        let body = format!("<html>{}</html>", "y".repeat(400));
        let err = ApiError::parse(&body);
        let message = err.to_string();
        assert!(message.starts_with("Invalid JSON response: <html>"));
        assert!(message.ends_with("..."));
        // prefix + 200 chars + ellipsis
        assert_eq!(message.chars().count(), "Invalid JSON response: ".len() + 200 + 3);
    }

    #[test]
    fn test_http_error_includes_status_and_body() {
        let err = ApiError::http(500, r#"{"error": "boom"}"#);
        assert_eq!(err.to_string(), r#"HTTP 500: {"error": "boom"}"#);
    }

    #[test]
    fn test_status_error_omits_body() {
        assert_eq!(ApiError::Status(502).to_string(), "HTTP 502");
    }

    #[test]
    fn test_unexpected_content_type_message() {
        let err = ApiError::UnexpectedContentType {
            content_type: Some("application/json".to_string()),
            body: "{}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected response format from export endpoint"
        );
    }
}
