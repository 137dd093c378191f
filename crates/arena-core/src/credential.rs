//! Credential store.
//!
//! Holds the current bearer token across restarts. The file-backed store
//! persists to `~/.arena/credentials.json`; every write replaces the whole
//! file atomically, so a reader never sees a half-written token.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Opaque bearer credential. Only the backend knows whether it is still valid.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for building an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Durable holder of the current credential.
///
/// Only login and logout write to the store; views read it once per render.
pub trait CredentialStore {
    /// Currently stored credential, or `None` when logged out.
    fn get(&self) -> Result<Option<Credential>>;
    /// Replace the stored credential.
    fn set(&mut self, credential: &Credential) -> Result<()>;
    /// Remove the stored credential. Clearing an empty store is not an error.
    fn clear(&mut self) -> Result<()>;
}

/// On-disk layout of the credentials file.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    access_token: Credential,
}

/// Credential store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `~/.arena/credentials.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".arena").join("credentials.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Result<Option<Credential>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<StoredCredential>(&content) {
            Ok(stored) if !stored.access_token.expose().is_empty() => {
                Ok(Some(stored.access_token))
            }
            Ok(_) => Ok(None),
            Err(e) => {
                // An unreadable file cannot authorize anything; treat as logged out.
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt credentials file");
                Ok(None)
            }
        }
    }

    fn set(&mut self, credential: &Credential) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(&StoredCredential {
            access_token: credential.clone(),
        })?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        tmp.persist(&self.path)
            .map_err(|e| Error::Credential(format!("Failed to persist credentials: {}", e.error)))?;
        debug!(path = %self.path.display(), "Stored credential");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cleared credential");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store. Does not survive a restart; used by tests and embedders
/// that manage persistence themselves.
#[derive(Debug, Default, Clone)]
pub struct MemoryCredentialStore {
    credential: Option<Credential>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Some(credential),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Result<Option<Credential>> {
        Ok(self.credential.clone())
    }

    fn set(&mut self, credential: &Credential) -> Result<()> {
        self.credential = Some(credential.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.credential = None;
        Ok(())
    }
}

impl<S: CredentialStore + ?Sized> CredentialStore for &mut S {
    fn get(&self) -> Result<Option<Credential>> {
        (**self).get()
    }

    fn set(&mut self, credential: &Credential) -> Result<()> {
        (**self).set(credential)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}
