//! Administration service: database dumps and restores.
//!
//! Only super users may call these endpoints. The check runs locally before
//! any request, so a regular player never reaches the backend here.

use thiserror::Error;
use tracing::info;

use arena_core::Credential;
use arena_core::model::Principal;

use crate::client::{ApiClient, ApiError, DumpReceipt};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Access denied: administrator rights required")]
    AccessDenied,

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn authorize(principal: &Principal) -> Result<(), AdminError> {
        if principal.is_super_user {
            Ok(())
        } else {
            Err(AdminError::AccessDenied)
        }
    }

    pub async fn list_dumps(
        &self,
        credential: &Credential,
        principal: &Principal,
    ) -> Result<Vec<String>, AdminError> {
        Self::authorize(principal)?;
        Ok(self.client.list_dumps(credential).await?)
    }

    pub async fn create_dump(
        &self,
        credential: &Credential,
        principal: &Principal,
    ) -> Result<DumpReceipt, AdminError> {
        Self::authorize(principal)?;
        let receipt = self.client.create_dump(credential).await?;
        info!(admin = principal.id, filename = %receipt.filename, "Created dump");
        Ok(receipt)
    }

    pub async fn restore(
        &self,
        credential: &Credential,
        principal: &Principal,
        filename: &str,
    ) -> Result<(), AdminError> {
        Self::authorize(principal)?;
        self.client.restore_dump(credential, filename).await?;
        info!(admin = principal.id, filename, "Restored dump");
        Ok(())
    }
}
