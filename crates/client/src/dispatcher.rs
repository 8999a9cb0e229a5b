//! The request dispatcher: verbs, envelope unwrap, and the 401 protocol.

use crate::refresh::{RefreshGate, RefreshOutcome};
use apibridge_auth::TokenService;
use apibridge_config::ApiConfig;
use apibridge_types::{
    ApiError, Envelope, TransportRequest, Verb, error::Result, traits::UiHooks,
    transport::Transport,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Per-call options; defaults to no extra headers.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Extra headers appended after the defaults.
    pub headers: Vec<(String, String)>,
}

/// Issues authenticated REST calls and owns the refresh-and-replay protocol.
///
/// Failure dispatch per status:
/// - 401: single-flight refresh through [`RefreshGate`], then one replay;
///   a second 401 (or a failed refresh) terminates as
///   [`ApiError::Unauthorized`].
/// - 403: logout, navigate to `sign-in`, toast, [`ApiError::Forbidden`].
/// - other non-2xx: logged with verb/path/payload; 4xx (except 401) also
///   toasts the envelope's message; [`ApiError::Status`].
pub struct RequestDispatcher {
    config: ApiConfig,
    transport: Arc<dyn Transport>,
    auth: Arc<TokenService>,
    gate: RefreshGate,
    ui: UiHooks,
}

impl RequestDispatcher {
    pub fn new(
        config: ApiConfig,
        transport: Arc<dyn Transport>,
        auth: Arc<TokenService>,
        ui: UiHooks,
    ) -> Self {
        Self {
            config,
            transport,
            auth,
            gate: RefreshGate::new(),
            ui,
        }
    }

    /// GET `path` and unwrap the envelope into `T`.
    ///
    /// # Errors
    ///
    /// See the type-level status dispatch; plus [`ApiError::Application`]
    /// when the envelope reports failure and [`ApiError::Serialization`]
    /// when `Data` does not deserialize as `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: CallOptions,
        show_loader: bool,
    ) -> Result<T> {
        let data = self
            .call(Verb::Get, path, None, &options, show_loader)
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// POST `body` to `path` and unwrap the envelope into `T`.
    ///
    /// # Errors
    ///
    /// As for [`get`](Self::get).
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: CallOptions,
        show_loader: bool,
    ) -> Result<T> {
        let payload = serde_json::to_value(body)?;
        let data = self
            .call(Verb::Post, path, Some(payload), &options, show_loader)
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// PUT `body` to `path` and unwrap the envelope into `T`.
    ///
    /// # Errors
    ///
    /// As for [`get`](Self::get).
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: CallOptions,
        show_loader: bool,
    ) -> Result<T> {
        let payload = serde_json::to_value(body)?;
        let data = self
            .call(Verb::Put, path, Some(payload), &options, show_loader)
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// DELETE `path` and unwrap the envelope into `T`.
    ///
    /// # Errors
    ///
    /// As for [`get`](Self::get).
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: CallOptions,
        show_loader: bool,
    ) -> Result<T> {
        let data = self
            .call(Verb::Delete, path, None, &options, show_loader)
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// One attempt plus, on 401, one coordinated refresh and one replay.
    async fn call(
        &self,
        verb: Verb,
        path: &str,
        body: Option<serde_json::Value>,
        options: &CallOptions,
        show_loader: bool,
    ) -> Result<serde_json::Value> {
        match self
            .dispatch_once(verb, path, body.as_ref(), options, show_loader)
            .await
        {
            Err(ApiError::Unauthorized) => {
                let auth = Arc::clone(&self.auth);
                let refresh = move || async move { auth.refresh().await };
                match self.gate.run_once(refresh).await {
                    RefreshOutcome::Refreshed => {
                        // The replay is not eligible for a second refresh.
                        self.dispatch_once(verb, path, body.as_ref(), options, show_loader)
                            .await
                    }
                    RefreshOutcome::Failed => Err(ApiError::Unauthorized),
                }
            }
            other => other,
        }
    }

    async fn dispatch_once(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&serde_json::Value>,
        options: &CallOptions,
        show_loader: bool,
    ) -> Result<serde_json::Value> {
        let mut request = TransportRequest::new(verb, self.config.resource_url(path))
            .header("Content-Type", "application/json")
            .header("Authorization", self.auth.bearer_header().await?);
        for (name, value) in &options.headers {
            request = request.header(name.clone(), value.clone());
        }
        if let Some(payload) = body {
            request = request.json(payload.clone());
        }

        if show_loader {
            self.ui.busy.show();
        }
        let outcome = self.transport.execute(request).await;
        if show_loader {
            self.ui.busy.hide();
        }

        let response = match outcome {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    verb = verb.as_str(),
                    path,
                    payload = ?body,
                    error = %e,
                    "transport failure"
                );
                return Err(e);
            }
        };

        if response.is_success() {
            return Self::unwrap_envelope(&response.body);
        }

        match response.status {
            401 => Err(ApiError::Unauthorized),
            403 => {
                // A store failure must not leave the user on the page without
                // the redirect; the credentials are stale either way.
                if let Err(e) = self.auth.logout().await {
                    tracing::error!(error = %e, "logout failed while handling 403");
                }
                self.ui.navigator.navigate("sign-in");
                self.ui
                    .notifier
                    .error("you_do_not_have_permision_for_access");
                Err(ApiError::Forbidden)
            }
            status => {
                let message = Self::failure_message(&response.body);
                tracing::error!(
                    verb = verb.as_str(),
                    path,
                    payload = ?body,
                    status,
                    message = %message,
                    "request failed"
                );
                if (400..500).contains(&status) {
                    self.ui.notifier.error(&message);
                }
                Err(ApiError::Status { status, message })
            }
        }
    }

    /// Parses a 2xx body as an envelope and unwraps it. An empty body counts
    /// as a failed envelope, a non-envelope body as malformed.
    fn unwrap_envelope(body: &str) -> Result<serde_json::Value> {
        if body.is_empty() {
            return Err(ApiError::Application { message: None });
        }
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
        Ok(envelope.into_data()?.unwrap_or(serde_json::Value::Null))
    }

    /// Error message for a failure body: the envelope's `ErrorMessage` when
    /// present, the raw text otherwise.
    fn failure_message(body: &str) -> String {
        serde_json::from_str::<Envelope<serde_json::Value>>(body)
            .ok()
            .and_then(|envelope| envelope.error_message)
            .unwrap_or_else(|| body.to_string())
    }
}
