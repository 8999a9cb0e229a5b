//! Cross-crate abstractions: credential storage and UI collaborators.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Well-known credential store keys.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const EMAIL: &str = "email";
    pub const FIRSTNAME: &str = "firstname";
    pub const LASTNAME: &str = "lastname";

    /// Every key the token service writes, in clearing order.
    pub const ALL: &[&str] = &[ACCESS_TOKEN, REFRESH_TOKEN, EMAIL, FIRSTNAME, LASTNAME];
}

/// Opaque named-value store holding the credential pair and identity fields.
///
/// Only the token service writes through this trait; everything else reads.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a named value, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    /// Write (or overwrite) a named value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Remove a named value; removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Visual busy-state collaborator (spinner/loader).
pub trait BusyIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

/// Toast/notification collaborator; messages are localization keys.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

/// Navigation collaborator (e.g. redirect to the sign-in route).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

struct NoopBusy;
impl BusyIndicator for NoopBusy {
    fn show(&self) {}
    fn hide(&self) {}
}

struct NoopNotifier;
impl Notifier for NoopNotifier {
    fn error(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
}

struct NoopNavigator;
impl Navigator for NoopNavigator {
    fn navigate(&self, _route: &str) {}
}

/// Bundle of UI collaborators handed to the access layer.
///
/// Defaults to no-ops so headless consumers (tests, background jobs) can
/// construct the layer without wiring a UI.
#[derive(Clone)]
pub struct UiHooks {
    pub busy: Arc<dyn BusyIndicator>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

impl Default for UiHooks {
    fn default() -> Self {
        Self {
            busy: Arc::new(NoopBusy),
            notifier: Arc::new(NoopNotifier),
            navigator: Arc::new(NoopNavigator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hooks_are_inert() {
        let hooks = UiHooks::default();
        hooks.busy.show();
        hooks.busy.hide();
        hooks.notifier.error("key");
        hooks.notifier.success("key");
        hooks.navigator.navigate("sign-in");
    }

    #[test]
    fn test_all_keys_cover_credential_and_identity() {
        assert_eq!(keys::ALL.len(), 5);
        assert!(keys::ALL.contains(&keys::ACCESS_TOKEN));
        assert!(keys::ALL.contains(&keys::LASTNAME));
    }
}
