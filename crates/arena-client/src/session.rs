//! Session lifecycle.
//!
//! ```text
//! Absent --login ok--> Valid
//! Valid  --verify: invalid--> Absent      (any non-200 answer; credential cleared)
//! Valid  --logout--> Absent
//! Valid  --verify: unavailable--> Valid   (no answer; credential kept)
//! ```
//!
//! An unavailable verification surfaces to the caller as a transient error.
//! The principal is re-resolved on every `resolve()` and never cached here.

use tracing::info;

use arena_core::model::Principal;
use arena_core::{Credential, CredentialStore};

use crate::auth::{AuthGateway, LoginError, VerifyError};
use crate::client::ApiError;

/// Logical session state, as far as the local store knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Absent,
    Valid,
}

/// Outcome of resolving the stored credential for one view.
#[derive(Debug)]
pub enum Resolution {
    /// Credential verified. Both values live only as long as the view.
    Authenticated {
        principal: Principal,
        credential: Credential,
    },
    /// Nothing stored.
    Anonymous,
    /// The backend rejected the stored credential; it has been cleared.
    Expired,
    /// Verification could not complete; the credential is untouched.
    Unavailable(ApiError),
}

impl Resolution {
    pub const fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated { principal, .. } => Some(principal),
            _ => None,
        }
    }
}

/// Session over a credential store.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    gateway: AuthGateway,
}

impl<S: CredentialStore> Session<S> {
    pub const fn new(store: S, gateway: AuthGateway) -> Self {
        Self { store, gateway }
    }

    pub const fn gateway(&self) -> &AuthGateway {
        &self.gateway
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> arena_core::Result<SessionState> {
        Ok(if self.store.get()?.is_some() {
            SessionState::Valid
        } else {
            SessionState::Absent
        })
    }

    /// Log in and persist the credential. On failure the store is untouched.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), LoginError> {
        let credential = self.gateway.login(username, password).await?;
        self.store.set(&credential)?;
        info!("Logged in");
        Ok(())
    }

    /// Forget the credential.
    pub fn logout(&mut self) -> arena_core::Result<()> {
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Read the stored credential and verify it, applying the state transitions.
    pub async fn resolve(&mut self) -> arena_core::Result<Resolution> {
        let Some(credential) = self.store.get()? else {
            return Ok(Resolution::Anonymous);
        };
        match self.gateway.verify(&credential).await {
            Ok(principal) => Ok(Resolution::Authenticated {
                principal,
                credential,
            }),
            Err(VerifyError::Invalid { status }) => {
                self.store.clear()?;
                info!(status, "Session invalidated by backend, credential cleared");
                Ok(Resolution::Expired)
            }
            Err(VerifyError::Unavailable(e)) => Ok(Resolution::Unavailable(e)),
        }
    }
}
