//! Fetch errors with status classification.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a non-success status was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusReason {
    /// HTTP 403 with a rate limit message, or 429
    RateLimitExceeded,
    /// HTTP 401
    AuthenticationFailed,
    /// HTTP 404
    NotFound,
    /// HTTP 403 without a rate limit message
    Forbidden,
    /// Any other 4xx
    ClientError,
    /// 5xx and anything else
    ServerError,
}

impl StatusReason {
    pub fn hint(&self) -> &'static str {
        match self {
            StatusReason::RateLimitExceeded => {
                "rate limit exceeded, try again later or set GITHUB_TOKEN"
            }
            StatusReason::AuthenticationFailed => "authentication failed, check GITHUB_TOKEN",
            StatusReason::NotFound => "no published release was found",
            StatusReason::Forbidden => "access forbidden, you may need authentication",
            StatusReason::ClientError => "request rejected",
            StatusReason::ServerError => "server error",
        }
    }
}

/// The single failure kind of a release fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The API answered with a non-success status.
    #[error("HTTP {status}: {}", .reason.hint())]
    Status { status: u16, reason: StatusReason },
    /// The body did not parse into a release.
    #[error("Failed to parse release response: {0}")]
    Parse(String),
    /// The request never produced a response.
    #[error("Failed to send request: {0}")]
    Request(String),
}

impl FetchError {
    /// HTTP status code, when the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Classifies a non-success status.
///
/// `body` is consulted only to tell a rate limited 403 from a plain one.
pub fn classify_status(status: StatusCode, body: &str) -> StatusReason {
    match status {
        StatusCode::UNAUTHORIZED => StatusReason::AuthenticationFailed,
        StatusCode::FORBIDDEN => {
            if body.to_lowercase().contains("rate limit") {
                StatusReason::RateLimitExceeded
            } else {
                StatusReason::Forbidden
            }
        }
        StatusCode::TOO_MANY_REQUESTS => StatusReason::RateLimitExceeded,
        StatusCode::NOT_FOUND => StatusReason::NotFound,
        s if s.is_client_error() => StatusReason::ClientError,
        _ => StatusReason::ServerError,
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::Status {
                status: status.as_u16(),
                reason: classify_status(status, ""),
            },
            None if e.is_decode() => FetchError::Parse(e.to_string()),
            None => FetchError::Request(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED, ""),
            StatusReason::AuthenticationFailed
        );
        assert_eq!(classify_status(StatusCode::FORBIDDEN, ""), StatusReason::Forbidden);
        assert_eq!(
            classify_status(
                StatusCode::FORBIDDEN,
                r#"{"message": "API rate limit exceeded for 1.2.3.4."}"#
            ),
            StatusReason::RateLimitExceeded
        );
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, ""),
            StatusReason::RateLimitExceeded
        );
        assert_eq!(classify_status(StatusCode::NOT_FOUND, ""), StatusReason::NotFound);
        assert_eq!(classify_status(StatusCode::BAD_REQUEST, ""), StatusReason::ClientError);
        assert_eq!(
            classify_status(StatusCode::BAD_GATEWAY, ""),
            StatusReason::ServerError
        );
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Status {
            status: 403,
            reason: StatusReason::RateLimitExceeded,
        };
        assert!(err.to_string().contains("HTTP 403"));
        assert!(err.to_string().contains("GITHUB_TOKEN"));

        let err = FetchError::Parse("missing field `tag_name`".into());
        assert!(err.to_string().contains("tag_name"));
    }

    #[test]
    fn test_fetch_error_status() {
        let err = FetchError::Status {
            status: 500,
            reason: StatusReason::ServerError,
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(FetchError::Request("refused".into()).status(), None);
    }
}
