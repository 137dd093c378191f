//! Arena Core Library
//!
//! Shared functionality for Arena components:
//! - Player, subscription and battle data model
//! - Durable credential store
//! - Layered settings resolution
//! - Battle statistics aggregation
//! - Common error types

pub mod config;
pub mod credential;
pub mod error;
pub mod model;
pub mod stats;
pub mod tracing_init;

pub use config::Settings;
pub use credential::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{Error, Result};
pub use stats::{Percentage, Summary};
