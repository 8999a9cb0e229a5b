//! Unified error type for the apibridge workspace.

use thiserror::Error;

/// Enumerates all failure kinds that can occur across apibridge crates.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport succeeded (2xx) but the response envelope reported failure.
    #[error("application error: {}", .message.as_deref().unwrap_or("unknown"))]
    Application {
        /// `ErrorMessage` carried by the envelope, if any.
        message: Option<String>,
    },

    /// 401 after an exhausted refresh-and-replay attempt, or a failed refresh.
    #[error("unauthorized")]
    Unauthorized,

    /// 403; credentials have been cleared and the caller redirected.
    #[error("you_do_not_have_permision_for_access")]
    Forbidden,

    /// Any other non-success HTTP status from the resource API.
    #[error("upstream error: status={status}, message={message}")]
    Status { status: u16, message: String },

    /// Sign-in rejected by the identity endpoint (400 with `error_description`).
    #[error("sign-in rejected: {0}")]
    Validation(String),

    /// The refresh grant itself failed; terminates every waiting caller.
    #[error("problem with refresh token")]
    RefreshFailed,

    /// Connectivity-level failure (connect/timeout) before any status arrived.
    #[error("service unreachable: {0}")]
    Offline(String),

    /// Response body did not parse as the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Other HTTP transport error.
    #[error("http error: {0}")]
    Http(String),

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Credential store error.
    #[error("storage error: {0}")]
    Storage(String),
}

// ── Feature-gated From impls ──────────────────────────────────────────────────

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::Offline(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}

impl ApiError {
    /// Returns `true` for terminal auth failures (the caller should sign in again).
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::Forbidden | Self::RefreshFailed
        )
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_application() {
        let err = ApiError::Application {
            message: Some("account name taken".into()),
        };
        assert_eq!(err.to_string(), "application error: account name taken");
    }

    #[test]
    fn test_error_display_application_without_message() {
        let err = ApiError::Application { message: None };
        assert_eq!(err.to_string(), "application error: unknown");
    }

    #[test]
    fn test_error_display_status() {
        let err = ApiError::Status {
            status: 500,
            message: "boom".into(),
        };
        let s = err.to_string();
        assert!(s.contains("500"));
        assert!(s.contains("boom"));
    }

    #[test]
    fn test_forbidden_carries_message_key() {
        assert_eq!(
            ApiError::Forbidden.to_string(),
            "you_do_not_have_permision_for_access"
        );
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json {{{").unwrap_err();
        let err: ApiError = json_err.into();
        assert!(matches!(err, ApiError::Serialization(_)));
    }

    #[test]
    fn test_is_auth_failure() {
        assert!(ApiError::Unauthorized.is_auth_failure());
        assert!(ApiError::Forbidden.is_auth_failure());
        assert!(ApiError::RefreshFailed.is_auth_failure());
        assert!(!ApiError::Offline("down".into()).is_auth_failure());
        assert!(
            !ApiError::Status {
                status: 404,
                message: String::new()
            }
            .is_auth_failure()
        );
    }
}
