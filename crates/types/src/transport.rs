//! Transport abstraction between the access layer and the wire.
//!
//! The dispatcher and the token service never talk to an HTTP client
//! directly; they build a [`TransportRequest`] and hand it to whatever
//! [`Transport`] they were constructed with. Any HTTP status comes back as
//! an `Ok` response; `Err` is reserved for connectivity-level failures.

use crate::error::Result;
use async_trait::async_trait;

/// HTTP verb supported by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Lower-case verb name, used for request logging.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }
}

/// Request payload variants.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// JSON body (resource API).
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` body (identity endpoint).
    Form(Vec<(String, String)>),
}

/// A fully-built request, ready for the wire.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub verb: Verb,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl TransportRequest {
    /// Creates a body-less request with the given verb and absolute URL.
    #[must_use]
    pub fn new(verb: Verb, url: impl Into<String>) -> Self {
        Self {
            verb,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Attaches a form-encoded body.
    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(fields));
        self
    }
}

/// Raw response: status plus the body text, parsed by the caller.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    /// Creates a response from a status and a body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a request against the wire.
///
/// Implementations return `Ok` for every completed HTTP exchange regardless
/// of status, and `Err` ([`crate::ApiError::Offline`] or
/// [`crate::ApiError::Http`]) only when no response was obtained.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_as_str() {
        assert_eq!(Verb::Get.as_str(), "get");
        assert_eq!(Verb::Delete.as_str(), "delete");
    }

    #[test]
    fn test_request_builder() {
        let req = TransportRequest::new(Verb::Post, "https://api/v1/Accounts")
            .header("Content-Type", "application/json")
            .json(serde_json::json!({"Name": "x"}));
        assert_eq!(req.verb, Verb::Post);
        assert_eq!(req.headers.len(), 1);
        assert!(matches!(req.body, Some(RequestBody::Json(_))));
    }

    #[test]
    fn test_response_is_success() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(301, "").is_success());
        assert!(!TransportResponse::new(401, "").is_success());
        assert!(!TransportResponse::new(500, "").is_success());
    }
}
