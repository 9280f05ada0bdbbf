// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential store implementations.
//!
//! [`FileCredentialStore`] keeps the token pair in a JSON file with 0600
//! permissions on unix. [`MemoryCredentialStore`] keeps it in process memory
//! and backs tests and embedders that manage persistence themselves.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use readlist_core::{Credential, CredentialStore, ReadlistError};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// On-disk shape of the credential file.
#[derive(Clone, Serialize, Deserialize)]
struct StoredCredential {
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

impl From<&Credential> for StoredCredential {
    fn from(credential: &Credential) -> Self {
        Self {
            access_token: credential.access_token().expose_secret().to_string(),
            refresh_token: credential
                .refresh_token()
                .map(|t| t.expose_secret().to_string()),
        }
    }
}

impl From<StoredCredential> for Credential {
    fn from(stored: StoredCredential) -> Self {
        Credential::new(stored.access_token, stored.refresh_token)
    }
}

/// Credential file on disk.
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
    fn load(&self) -> Result<Option<Credential>, ReadlistError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(e)),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredCredential =
            serde_json::from_str(&contents).map_err(|e| ReadlistError::Storage {
                source: format!("failed to parse {}: {e}", self.path.display()).into(),
            })?;
        Ok(Some(stored.into()))
    }

    fn save(&self, credential: &Credential) -> Result<(), ReadlistError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(storage_error)?;
        }

        let contents = serde_json::to_string_pretty(&StoredCredential::from(credential))
            .map_err(|e| ReadlistError::Internal(format!("failed to serialize credential: {e}")))?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(storage_error)?;
        file.write_all(contents.as_bytes()).map_err(storage_error)?;

        debug!(path = %self.path.display(), "credential saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), ReadlistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "credential removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(e)),
        }
    }
}

/// In-process credential store.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<StoredCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let present = self.slot.read().map(|s| s.is_some()).unwrap_or(false);
        f.debug_struct("MemoryCredentialStore")
            .field("present", &present)
            .finish()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>, ReadlistError> {
        let slot = self.slot.read().map_err(|_| poisoned())?;
        Ok(slot.clone().map(Credential::from))
    }

    fn save(&self, credential: &Credential) -> Result<(), ReadlistError> {
        *self.slot.write().map_err(|_| poisoned())? = Some(credential.into());
        Ok(())
    }

    fn clear(&self) -> Result<(), ReadlistError> {
        *self.slot.write().map_err(|_| poisoned())? = None;
        Ok(())
    }
}

fn storage_error(e: std::io::Error) -> ReadlistError {
    ReadlistError::Storage {
        source: Box::new(e),
    }
}

fn poisoned() -> ReadlistError {
    ReadlistError::Internal("credential store lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips_both_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested/credentials.json"));
        store
            .save(&Credential::new("acc", Some("ref".into())))
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.access_token().expose_secret(), "acc");
        assert_eq!(loaded.refresh_token().unwrap().expose_secret(), "ref");
    }

    #[cfg(unix)]
    #[test]
    fn credential_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        store.save(&Credential::new("acc", None)).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn clear_removes_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        store
            .save(&Credential::new("acc", Some("ref".into())))
            .unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{not json").unwrap();
        let store = FileCredentialStore::new(path);
        assert!(matches!(
            store.load(),
            Err(ReadlistError::Storage { .. })
        ));
    }

    #[test]
    fn memory_store_lifecycle() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().unwrap().is_none());
        store
            .save(&Credential::new("acc", Some("ref".into())))
            .unwrap();
        assert!(store.load().unwrap().unwrap().has_access_token());
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(!format!("{store:?}").contains("acc"));
    }
}
