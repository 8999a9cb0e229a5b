//! Configuration for the apibridge access layer.
//!
//! Uses figment for YAML-based configuration with sensible defaults, merged
//! with `APIBRIDGE_*` environment variables.

pub mod schema;

pub use schema::ApiConfig;
