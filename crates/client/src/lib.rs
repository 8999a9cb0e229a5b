//! Request dispatch for the apibridge access layer.
//!
//! [`RequestDispatcher`] wraps generic REST verbs against the resource API:
//! it attaches the bearer credential, unwraps the response envelope, and on
//! 401 coordinates a single-flight token refresh through [`RefreshGate`]
//! before replaying the failed call exactly once.

pub mod accounts;
pub mod dispatcher;
pub mod filter;
pub mod refresh;
pub mod transport;

pub use accounts::{AccountCreate, AccountNavigation, AccountUpdate, AccountView, AccountsApi};
pub use dispatcher::{CallOptions, RequestDispatcher};
pub use filter::{FilterValue, QueryFilter};
pub use refresh::{RefreshGate, RefreshOutcome};
pub use transport::HttpTransport;
