//! The universal response wrapper used by the resource API.
//!
//! Every resource endpoint answers with `{IsSuccess, Data, ErrorMessage}`,
//! even on HTTP 200. A 2xx status therefore never implies application
//! success; only `IsSuccess` does.

use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};

/// Typed response envelope `{IsSuccess, Data, ErrorMessage}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope<T> {
    /// Application-level success flag; authoritative over the HTTP status.
    #[serde(default)]
    pub is_success: bool,
    /// Payload, present on success.
    ///
    /// The explicit default path keeps the derive from demanding
    /// `T: Default`; payload types only ever need `Deserialize`.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Human-readable failure message, present on failure.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, honoring envelope precedence: a failed envelope
    /// is an [`ApiError::Application`] no matter what the transport said.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Application`] when `is_success` is false.
    pub fn into_data(self) -> Result<Option<T>> {
        if self.is_success {
            Ok(self.data)
        } else {
            Err(ApiError::Application {
                message: self.error_message,
            })
        }
    }
}
