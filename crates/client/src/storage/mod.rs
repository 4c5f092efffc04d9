//! Client-side key-value storage.
//!
//! The session and the cart outlive a single run of the front end, the way a
//! browser keeps them in local storage. [`KeyValueStore`] is the port both are
//! written against; [`InMemoryStore`] and [`FileStore`] are the two adapters.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key contains characters the backend cannot store.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Abstraction for string key-value storage backends.
///
/// Uses async methods so that implementations can do I/O.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Returns `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove a value. Succeeds if the key does not exist.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every stored value.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Read and deserialize a JSON value.
///
/// # Errors
///
/// Returns `StorageError` if the backend fails or the value is not valid JSON
/// for `T`.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize and write a JSON value.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the backend fails.
pub async fn save_json<T: Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}

/// Keys must be non-empty ASCII alphanumerics, `-` or `_`.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
