//! Arena API Client Library
//!
//! Talks to the Arena REST backend over HTTP:
//! - `client`: reqwest-based transport and error classification
//! - `auth`: registration, login and credential verification
//! - `session`: logged-in/logged-out state machine over a credential store
//! - `subscriptions`: follow/unfollow with authoritative refresh
//! - `admin`: dump and restore, gated on super-user principals

pub mod admin;
pub mod auth;
mod client;
pub mod session;
pub mod subscriptions;

pub use admin::{AdminError, AdminService};
pub use auth::{AuthGateway, LoginError, RegisterError, VerifyError};
pub use client::{ApiClient, ApiError, DumpReceipt};
pub use session::{Resolution, Session, SessionState};
pub use subscriptions::{RelationshipToggle, SubscriptionView, Toggle, ToggleOutcome};
