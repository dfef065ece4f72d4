//! Local key/value storage for listings and bookings
//!
//! Values are stored as JSON text under a string key, the way a browser's
//! local storage holds them. Two backends are provided: an in-memory map for
//! tests and development, and a directory of `<key>.json` files.

pub mod file;
pub mod in_memory;

pub use file::FileLocalStore;
pub use in_memory::InMemoryLocalStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::error::StorageError;

/// Raw key/value storage
///
/// Object safe, so stores can be shared as `Arc<dyn LocalStore>`. Typed
/// access goes through [`LocalStoreExt`].
pub trait LocalStore: Send + Sync {
    /// Read the raw value of a key, `None` when absent
    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the raw value of a key, replacing any previous value
    fn save_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key; returns whether it existed
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

/// JSON encoding on top of [`LocalStore`]
pub trait LocalStoreExt: LocalStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.load_raw(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Serialization {
                key: key.to_string(),
                source,
            })
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
            key: key.to_string(),
            source,
        })?;
        self.save_raw(key, &raw)
    }
}

impl<S: LocalStore + ?Sized> LocalStoreExt for S {}

/// Keys double as file names, so they are restricted to a safe alphabet
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}
