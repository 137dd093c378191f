//! Per-invocation context shared by every view.
//!
//! Protected views start with [`Context::authenticate`]: read the credential
//! store, verify, and either hand back a principal or render the
//! unauthenticated fallback.

use std::io::Write;

use arena_client::{AdminService, ApiClient, AuthGateway, RelationshipToggle, Resolution, Session};
use arena_core::model::Principal;
use arena_core::{Credential, CredentialStore};

use crate::fmt::describe_api_error;

/// Services for one CLI invocation.
#[derive(Debug)]
pub struct Context<S> {
    pub session: Session<S>,
    pub toggle: RelationshipToggle,
    pub admin: AdminService,
}

impl<S: CredentialStore> Context<S> {
    pub fn new(client: ApiClient, store: S) -> Self {
        Self {
            session: Session::new(store, AuthGateway::new(client.clone())),
            toggle: RelationshipToggle::new(client.clone()),
            admin: AdminService::new(client),
        }
    }

    pub const fn client(&self) -> &ApiClient {
        self.session.gateway().client()
    }

    /// Resolve the session for a protected view.
    ///
    /// Returns `None` after rendering why the view cannot be shown.
    pub async fn authenticate(
        &mut self,
        out: &mut impl Write,
    ) -> anyhow::Result<Option<(Principal, Credential)>> {
        match self.session.resolve().await? {
            Resolution::Authenticated {
                principal,
                credential,
            } => Ok(Some((principal, credential))),
            Resolution::Anonymous => {
                writeln!(out, "Not logged in. Run: arena auth login")?;
                Ok(None)
            }
            Resolution::Expired => {
                writeln!(out, "Session expired or invalid. Please log in again.")?;
                Ok(None)
            }
            Resolution::Unavailable(e) => {
                writeln!(
                    out,
                    "Could not verify your session: {}. Try again later.",
                    describe_api_error(&e)
                )?;
                Ok(None)
            }
        }
    }
}
