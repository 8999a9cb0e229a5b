//! Credential store backends.
//!
//! Provides an in-memory store for testing and a JSON-file-backed store for
//! persistence across restarts.

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;
