//! reqwest-backed [`Transport`] implementation.

use apibridge_config::ApiConfig;
use apibridge_types::{
    ApiError, RequestBody, TransportRequest, TransportResponse, Verb, error::Result,
    transport::Transport,
};
use async_trait::async_trait;
use std::time::Duration;

/// Production transport over a shared [`reqwest::Client`].
///
/// Connect and timeout failures surface as [`ApiError::Offline`], other
/// transport failures as [`ApiError::Http`]; any completed exchange is an
/// `Ok` response regardless of status.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Builds a client with the configured per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the TLS backend cannot be initialized.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;
        Ok(Self { http })
    }

    /// Wraps an existing client (e.g. one shared with other subsystems).
    #[must_use]
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let method = match request.verb {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            Some(RequestBody::Json(ref value)) => builder.json(value),
            Some(RequestBody::Form(ref fields)) => builder.form(fields),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse::new(status, body))
    }
}
