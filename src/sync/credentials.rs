//! Storage for API tokens.

use crate::sync::SyncError;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, instrument};

/// Access and refresh token issued by the sync API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct TokenPair {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Long-lived token used to obtain a new access token.
    pub refresh_token: String,
}

impl Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Where the API client keeps its tokens.
pub trait CredentialStore: Debug + Send + Sync {
    /// Loads the stored token pair, if any.
    fn load(&self) -> Result<Option<TokenPair>, SyncError>;

    /// Replaces the stored token pair.
    fn save(&self, tokens: &TokenPair) -> Result<(), SyncError>;

    /// Forgets any stored tokens.
    fn clear(&self) -> Result<(), SyncError>;
}

/// Process-local credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    tokens: Mutex<Option<TokenPair>>,
}

impl MemoryCredentialStore {
    /// Creates a store already holding `tokens`.
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: Mutex::new(Some(tokens)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<TokenPair>>, SyncError> {
        self.tokens
            .lock()
            .map_err(|_| SyncError::Credentials("Credential lock poisoned".to_string()))
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<TokenPair>, SyncError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), SyncError> {
        *self.lock()? = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SyncError> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Credential store backed by a TOML file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store reading and writing `path`.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        debug!("Creating file credential store");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the credentials file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<TokenPair>, SyncError> {
        if !self.path.exists() {
            debug!("No credentials file");
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| SyncError::Credentials(format!("Failed to read credentials: {}", e)))?;
        let tokens = toml::from_str(&contents)
            .map_err(|e| SyncError::Credentials(format!("Failed to parse credentials: {}", e)))?;
        Ok(Some(tokens))
    }

    #[instrument(skip(self, tokens), fields(path = %self.path.display()))]
    fn save(&self, tokens: &TokenPair) -> Result<(), SyncError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SyncError::Credentials(format!("Failed to create credentials directory: {}", e))
            })?;
        }
        let contents = toml::to_string(tokens)
            .map_err(|e| SyncError::Credentials(format!("Failed to encode credentials: {}", e)))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| SyncError::Credentials(format!("Failed to write credentials: {}", e)))?;
        info!("Credentials saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self) -> Result<(), SyncError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Credentials cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SyncError::Credentials(format!(
                "Failed to remove credentials: {}",
                e
            ))),
        }
    }
}
