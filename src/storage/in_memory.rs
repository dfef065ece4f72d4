//! In-memory implementation of LocalStore for testing and development

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{LocalStore, check_key};
use crate::core::error::StorageError;

/// In-memory local store
///
/// Clones share the same map. Uses RwLock for thread-safe access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocalStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Lock {
        message: e.to_string(),
    }
}

impl LocalStore for InMemoryLocalStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        check_key(key)?;
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries.get(key).cloned())
    }

    fn save_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        check_key(key)?;
        let mut entries = self.entries.write().map_err(lock_error)?;
        Ok(entries.remove(key).is_some())
    }
}
