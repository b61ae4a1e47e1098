//! Durable session-token storage.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::SessionTokens;
use crate::error::{Error, ErrorKind, StorageErrorKind};

/// Durable key-value persistence for the session token pair.
///
/// Writes are last-write-wins; implementations provide whatever
/// atomicity the backing medium offers and nothing more. Only the
/// callback processor writes here, the session facade reads and clears.
pub trait SessionStore: Send + Sync {
    /// Unconditionally overwrite both tokens.
    fn set_tokens(&self, tokens: SessionTokens) -> Result<(), Error>;

    /// Get the stored identity token, if present.
    fn get_id_token(&self) -> Option<SecretString>;

    /// Get the stored access token, if present.
    fn get_access_token(&self) -> Option<SecretString>;

    /// True when both tokens are present.
    fn has_tokens(&self) -> bool {
        self.get_id_token().is_some() && self.get_access_token().is_some()
    }

    /// Remove both tokens. Absence is not an error.
    fn clear_tokens(&self) -> Result<(), Error>;
}

/// In-memory session store.
///
/// Clones share the same underlying state, so the callback processor and
/// the session facade can each hold a handle.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    tokens: Arc<Mutex<Option<SessionTokens>>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn set_tokens(&self, tokens: SessionTokens) -> Result<(), Error> {
        let mut slot = self.tokens.lock().unwrap();
        *slot = Some(tokens);
        Ok(())
    }

    fn get_id_token(&self) -> Option<SecretString> {
        let slot = self.tokens.lock().unwrap();
        slot.as_ref().map(|tokens| tokens.id_token.clone())
    }

    fn get_access_token(&self) -> Option<SecretString> {
        let slot = self.tokens.lock().unwrap();
        slot.as_ref().map(|tokens| tokens.access_token.clone())
    }

    fn clear_tokens(&self) -> Result<(), Error> {
        let mut slot = self.tokens.lock().unwrap();
        *slot = None;
        Ok(())
    }
}

/// On-disk shape of the stored pair. The file either holds both tokens
/// or does not exist.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(rename = "cognito_id_token", skip_serializing_if = "Option::is_none")]
    id_token: Option<String>,
    #[serde(rename = "cognito_access_token", skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
}

/// File-backed session store.
///
/// Writes go through a temp file and an atomic rename, and the file is
/// owner-only on Unix. Every read goes back to disk, so separate
/// instances pointed at the same path observe each other's writes.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store persisting to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> StoredTokens {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return StoredTokens::default(),
        };

        serde_json::from_str(&content).unwrap_or_else(|err| {
            warn!(error = %err, path = %self.path.display(), "session file is not valid JSON");
            StoredTokens::default()
        })
    }

    fn save(&self, stored: &StoredTokens) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let content = serde_json::to_string_pretty(stored).map_err(|err| Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Storage(StorageErrorKind::WriteFailed),
        })?;

        // Temp file plus rename keeps the pair invariant across crashes.
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(write_error)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&temp_path, permissions).map_err(write_error)?;
        }

        fs::rename(&temp_path, &self.path).map_err(write_error)?;
        Ok(())
    }
}

fn write_error(err: io::Error) -> Error {
    Error {
        source: Some(Box::new(err)),
        error_kind: ErrorKind::Storage(StorageErrorKind::WriteFailed),
    }
}

impl SessionStore for FileSessionStore {
    fn set_tokens(&self, tokens: SessionTokens) -> Result<(), Error> {
        let stored = StoredTokens {
            id_token: Some(tokens.id_token.expose_secret().to_string()),
            access_token: Some(tokens.access_token.expose_secret().to_string()),
        };
        self.save(&stored)
    }

    fn get_id_token(&self) -> Option<SecretString> {
        self.load().id_token.map(SecretString::from)
    }

    fn get_access_token(&self) -> Option<SecretString> {
        self.load().access_token.map(SecretString::from)
    }

    fn clear_tokens(&self) -> Result<(), Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error {
                source: Some(Box::new(err)),
                error_kind: ErrorKind::Storage(StorageErrorKind::WriteFailed),
            }),
        }
    }
}
