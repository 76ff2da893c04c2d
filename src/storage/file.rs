// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed credential store.
//!
//! All entries live in one JSON object file written with owner-only
//! permissions (0600). Each write replaces the file through a rename, so
//! readers see either the old or the new entries. The token is never logged.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::CredentialStore;
use crate::config::ConfigError;
use crate::error::ClientError;

/// Credential file name inside the data directory.
const CREDENTIALS_FILE: &str = "credentials.json";

type Entries = BTreeMap<String, String>;

/// Credential store persisted to a JSON file.
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store at the platform data directory (e.g. `~/.local/share/junkstop`).
    pub fn open_default() -> Result<Self, ConfigError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = directories::ProjectDirs::from("app", "JunkStop", "junkstop")
            .ok_or(ConfigError::NoDataDir)?;
        Ok(dirs.data_dir().join(CREDENTIALS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all entries. Missing or unreadable files read as empty.
    async fn load(&self) -> Entries {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Entries::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read credential file");
                return Entries::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Credential file is corrupt, ignoring");
            Entries::new()
        })
    }

    async fn save(&self, entries: &Entries) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ClientError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| ClientError::Storage(format!("Failed to serialize credentials: {}", e)))?;

        // Write a sibling file and rename it over the old one, so a crash
        // mid-write leaves the previous entries intact.
        let tmp_path = self.tmp_path();
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&tmp_path).await.map_err(|e| {
            ClientError::Storage(format!("Failed to open {}: {}", tmp_path.display(), e))
        })?;
        // `mode` only applies on creation; a leftover temp file keeps its old bits.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| {
                    ClientError::Storage(format!("Failed to chmod {}: {}", tmp_path.display(), e))
                })?;
        }
        file.write_all(contents.as_bytes()).await.map_err(|e| {
            ClientError::Storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        file.sync_all()
            .await
            .map_err(|e| ClientError::Storage(format!("Failed to sync {}: {}", tmp_path.display(), e)))?;
        drop(file);

        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            ClientError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| CREDENTIALS_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CredentialStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().await;
        self.load().await.remove(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), ClientError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries).await
    }
}
