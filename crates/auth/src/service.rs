//! Credential exchange against the identity endpoint.

use crate::events::{AuthEvent, EventBus};
use apibridge_config::ApiConfig;
use apibridge_types::{
    ApiError, Envelope, Identity, SignIn, TokenErrorBody, TokenPair, TransportRequest, UserProfile,
    Verb, error::Result, keys,
    traits::{CredentialStore, UiHooks},
    transport::Transport,
};
use std::sync::Arc;

/// Performs login/refresh/logout against the identity endpoint and owns all
/// credential-store writes.
///
/// The identity endpoint speaks form-encoded OAuth grants and answers with a
/// raw token pair, independent of the resource API's JSON envelope.
pub struct TokenService {
    config: ApiConfig,
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
    events: EventBus,
    ui: UiHooks,
}

impl TokenService {
    pub fn new(
        config: ApiConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
        ui: UiHooks,
    ) -> Self {
        Self {
            config,
            transport,
            store,
            events: EventBus::default(),
            ui,
        }
    }

    /// Login-state event bus; subscribe before calling [`login`](Self::login)
    /// or [`logout`](Self::logout) to observe the transition.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Exchanges username/password for a token pair, persists it, fetches
    /// and persists the caller's profile, then broadcasts
    /// `LoginStateChanged(true)`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Offline`] when the identity endpoint is unreachable
    /// (after a `webapi_offline` toast), [`ApiError::Validation`] on a 400
    /// with `error_description` (after a toast with that description), or
    /// [`ApiError::Status`] for other rejections.
    pub async fn login(&self, sign_in: &SignIn) -> Result<()> {
        self.ui.busy.show();
        let exchange = self.password_grant(sign_in).await;
        self.ui.busy.hide();
        let pair = exchange?;

        self.store_pair(&pair).await?;
        self.store.set(keys::EMAIL, &sign_in.email).await?;

        self.fetch_and_store_profile().await?;
        self.events.emit(AuthEvent::LoginStateChanged(true));
        Ok(())
    }

    /// Exchanges the stored refresh token for a new pair and persists it.
    ///
    /// With no stored access token this is a success no-op: there is nothing
    /// to refresh and no network call is made.
    ///
    /// # Errors
    ///
    /// Any grant failure collapses into [`ApiError::RefreshFailed`] so the
    /// dispatcher can terminate the whole wait chain with one shape.
    pub async fn refresh(&self) -> Result<()> {
        let access = self.store.get(keys::ACCESS_TOKEN).await?;
        if access.as_deref().is_none_or(str::is_empty) {
            return Ok(());
        }
        let refresh_token = self.store.get(keys::REFRESH_TOKEN).await?.unwrap_or_default();

        let form = vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("client_id".to_string(), self.config.client_id.clone()),
            ("client_secret".to_string(), self.config.client_secret.clone()),
            ("refresh_token".to_string(), refresh_token),
        ];
        let request = TransportRequest::new(Verb::Post, self.config.token_url()).form(form);

        let response = match self.transport.execute(request).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "refresh grant transport failure");
                return Err(ApiError::RefreshFailed);
            }
        };
        if !response.is_success() {
            tracing::warn!(status = response.status, "refresh grant rejected");
            return Err(ApiError::RefreshFailed);
        }
        let pair: TokenPair =
            serde_json::from_str(&response.body).map_err(|_| ApiError::RefreshFailed)?;
        self.store_pair(&pair).await
    }

    /// Clears the stored credential and identity, then broadcasts
    /// `LoginStateChanged(false)`. Local-only and idempotent.
    ///
    /// # Errors
    ///
    /// Only a credential-store failure can surface here.
    pub async fn logout(&self) -> Result<()> {
        // TODO: call the identity endpoint to invalidate the pair server-side.
        for key in keys::ALL {
            self.store.remove(key).await?;
        }
        self.events.emit(AuthEvent::LoginStateChanged(false));
        Ok(())
    }

    /// `true` iff a non-empty access token is currently stored.
    pub async fn is_authenticated(&self) -> bool {
        matches!(
            self.store.get(keys::ACCESS_TOKEN).await,
            Ok(Some(token)) if !token.is_empty()
        )
    }

    /// `Authorization` header value built from the current access token.
    ///
    /// Expiry is never validated locally; the server rejecting the call is
    /// the only expiry signal.
    ///
    /// # Errors
    ///
    /// Only a credential-store failure can surface here.
    pub async fn bearer_header(&self) -> Result<String> {
        let token = self.store.get(keys::ACCESS_TOKEN).await?.unwrap_or_default();
        Ok(format!("Bearer {token}"))
    }

    /// Stored identity, if a profile has been persisted.
    ///
    /// # Errors
    ///
    /// Only a credential-store failure can surface here.
    pub async fn identity(&self) -> Result<Option<Identity>> {
        let email = self.store.get(keys::EMAIL).await?;
        let firstname = self.store.get(keys::FIRSTNAME).await?;
        let lastname = self.store.get(keys::LASTNAME).await?;
        Ok(match (email, firstname, lastname) {
            (Some(email), Some(firstname), Some(lastname)) => Some(Identity {
                email,
                firstname,
                lastname,
            }),
            _ => None,
        })
    }

    async fn store_pair(&self, pair: &TokenPair) -> Result<()> {
        self.store.set(keys::ACCESS_TOKEN, &pair.access_token).await?;
        self.store.set(keys::REFRESH_TOKEN, &pair.refresh_token).await
    }

    async fn password_grant(&self, sign_in: &SignIn) -> Result<TokenPair> {
        let form = vec![
            ("username".to_string(), sign_in.email.clone()),
            ("password".to_string(), sign_in.password.clone()),
            ("grant_type".to_string(), "password".to_string()),
            ("client_id".to_string(), self.config.client_id.clone()),
            ("client_secret".to_string(), self.config.client_secret.clone()),
            ("scope".to_string(), self.config.scope.clone()),
        ];
        let request = TransportRequest::new(Verb::Post, self.config.token_url()).form(form);

        let response = match self.transport.execute(request).await {
            Ok(r) => r,
            Err(e @ ApiError::Offline(_)) => {
                self.ui.notifier.error("webapi_offline");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        if response.status == 400 {
            let description = serde_json::from_str::<TokenErrorBody>(&response.body)
                .ok()
                .and_then(|b| b.error_description)
                .unwrap_or_else(|| response.body.clone());
            self.ui.notifier.error(&description);
            return Err(ApiError::Validation(description));
        }
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                message: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Fetches `Users/Profile` with the fresh bearer token and persists the
    /// identity fields when the envelope reports success.
    async fn fetch_and_store_profile(&self) -> Result<()> {
        let request = TransportRequest::new(Verb::Get, self.config.resource_url("Users/Profile"))
            .header("Content-Type", "application/json")
            .header("Authorization", self.bearer_header().await?);

        self.ui.busy.show();
        let response = self.transport.execute(request).await;
        self.ui.busy.hide();
        let response = response?;

        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                message: response.body,
            });
        }
        match serde_json::from_str::<Envelope<UserProfile>>(&response.body) {
            Ok(envelope) if envelope.is_success => {
                if let Some(profile) = envelope.data {
                    self.store.set(keys::FIRSTNAME, &profile.firstname).await?;
                    self.store.set(keys::LASTNAME, &profile.lastname).await?;
                    self.store.set(keys::EMAIL, &profile.email).await?;
                }
            }
            Ok(_) | Err(_) => {
                // Profile is best-effort; login stands even without identity.
                tracing::warn!("profile fetch returned an unusable body");
            }
        }
        Ok(())
    }
}
