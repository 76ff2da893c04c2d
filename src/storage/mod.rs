//! Persistent credential storage.
//!
//! Holds exactly two entries, the bearer token and the cached user
//! snapshot. Entries are written independently; callers must tolerate a
//! token without a user record and vice versa.

pub mod file;
pub mod memory;

use async_trait::async_trait;

use crate::error::ClientError;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key names.
pub mod keys {
    pub const AUTH_TOKEN: &str = "auth_token";
    /// JSON-serialized `User`
    pub const USER_DATA: &str = "user_data";
}

/// Device-local key/value store for credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a value. Absence is a normal result; backends report read
    /// failures as absent.
    async fn get(&self, key: &str) -> Option<String>;

    /// Overwrite a value.
    async fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;

    /// Delete a value. Removing a missing key is a no-op.
    async fn remove(&self, key: &str) -> Result<(), ClientError>;

    /// Remove both the token and the user record.
    async fn clear_credentials(&self) -> Result<(), ClientError> {
        self.remove(keys::AUTH_TOKEN).await?;
        self.remove(keys::USER_DATA).await
    }
}
