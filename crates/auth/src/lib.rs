//! Token lifecycle for the apibridge access layer.
//!
//! [`TokenService`] performs the credential exchanges against the identity
//! endpoint (password grant at login, refresh grant on expiry) and is the
//! only writer of the credential store. Login-state transitions are fanned
//! out through [`EventBus`].

pub mod events;
pub mod service;

pub use events::{AuthEvent, EventBus};
pub use service::TokenService;
