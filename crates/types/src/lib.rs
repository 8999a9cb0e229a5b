//! Shared data model for the apibridge workspace.
//!
//! Every cross-crate type lives here so that higher layers depend only on
//! `apibridge-types`, not on each other.

pub mod envelope;
pub mod error;
pub mod token;
pub mod traits;
pub mod transport;

pub use envelope::Envelope;
pub use error::ApiError;
pub use token::{Identity, SignIn, TokenErrorBody, TokenPair, UserProfile};
pub use traits::{BusyIndicator, CredentialStore, Navigator, Notifier, UiHooks, keys};
pub use transport::{RequestBody, Transport, TransportRequest, TransportResponse, Verb};
