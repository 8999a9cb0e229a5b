//! Identity-endpoint wire shapes and derived user identity.
//!
//! The identity endpoint (`connect/token`) speaks a different dialect than
//! the resource API: form-encoded requests, snake_case token responses, no
//! envelope. The profile endpoint, by contrast, is a regular enveloped
//! resource with PascalCase fields.

use serde::{Deserialize, Serialize};

/// Raw token pair returned by the identity endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Error body returned by the identity endpoint on 400.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorBody {
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Sign-in form input.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

/// User identity derived from the profile fetch after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
}

/// `Users/Profile` payload (enveloped, PascalCase wire form).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserProfile {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
}
