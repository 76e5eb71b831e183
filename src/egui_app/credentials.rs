//! Credential persistence
//!
//! The access token is the only client state that outlives the process.
//! It is written after a successful login/register, read once at startup
//! to restore the session, and removed on logout or when the server
//! rejects it.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::ClientError;

pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, ClientError>;
    fn save(&self, token: &str) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredCredentials {
    access_token: String,
    saved_at: DateTime<Utc>,
}

/// JSON file in the user's local data directory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<StoredCredentials>(&raw) {
            Ok(stored) if !stored.access_token.is_empty() => Ok(Some(stored.access_token)),
            Ok(_) => Ok(None),
            Err(e) => {
                // A corrupt file behaves like no file; the next login overwrites it.
                tracing::warn!("Ignoring unreadable credentials at {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let stored = StoredCredentials {
            access_token: token.to_string(),
            saved_at: Utc::now(),
        };
        let mut file = open_private(&self.path)?;
        file.write_all(&serde_json::to_vec_pretty(&stored)?)?;

        tracing::debug!("Saved credentials to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Open `path` for writing, owner-only from the moment it exists.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; tighten a file left by an older run.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Process-local store, used when nothing should touch the disk.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        let guard = self
            .token
            .lock()
            .map_err(|_| ClientError::storage("credential lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| ClientError::storage("credential lock poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| ClientError::storage("credential lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}
