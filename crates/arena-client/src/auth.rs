//! Authentication: registration, login and credential verification.

use thiserror::Error;
use tracing::{debug, warn};

use arena_core::Credential;
use arena_core::model::{Principal, Registration};

use crate::client::{ApiClient, ApiError};

/// Why a stored credential could not be turned into a principal.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The backend rejected the credential. Equivalent to "not logged in";
    /// retrying with the same credential is pointless.
    #[error("Invalid or expired credential (HTTP {status})")]
    Invalid { status: u16 },

    /// No answer was received, or the 200 body could not be read.
    /// The credential may still be good.
    #[error("Verification unavailable: {0}")]
    Unavailable(#[source] ApiError),
}

/// Login failures.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Please fill in all fields")]
    Incomplete,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Login unavailable: {0}")]
    Unavailable(#[source] ApiError),

    #[error("Could not save credential: {0}")]
    Store(#[from] arena_core::Error),
}

/// Registration failures.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Please fill in all fields")]
    Incomplete,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Resolves credentials against the backend identity endpoint.
#[derive(Debug, Clone)]
pub struct AuthGateway {
    client: ApiClient,
}

impl AuthGateway {
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Verify a credential and return the principal it belongs to.
    ///
    /// Any answer other than 200, whatever its status class, is `Invalid`.
    /// `Unavailable` is kept for requests that never got a response and for
    /// a 200 whose body is not a principal.
    pub async fn verify(&self, credential: &Credential) -> Result<Principal, VerifyError> {
        match self.client.current_user(credential).await {
            Ok(principal) => {
                debug!(user_id = principal.id, "Credential verified");
                Ok(principal)
            }
            Err(ApiError::Api { status, detail }) => {
                warn!(status, %detail, "Credential rejected by backend");
                Err(VerifyError::Invalid { status })
            }
            Err(e) => {
                warn!(error = %e, "Credential verification unavailable");
                Err(VerifyError::Unavailable(e))
            }
        }
    }

    /// Exchange username and password for a credential. Does not persist it.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, LoginError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(LoginError::Incomplete);
        }
        self.client
            .issue_token(username, password)
            .await
            .map_err(|e| {
                if e.is_client_rejection() {
                    LoginError::InvalidCredentials
                } else {
                    LoginError::Unavailable(e)
                }
            })
    }

    /// Create an account. Incomplete forms are refused before any request.
    pub async fn register(&self, registration: &Registration) -> Result<(), RegisterError> {
        if !registration.is_complete() {
            return Err(RegisterError::Incomplete);
        }
        self.client.register(registration).await?;
        debug!(tag = %registration.tag, "Registered account");
        Ok(())
    }
}
