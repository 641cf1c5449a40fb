//! Persistence boundary for the draft order.
//!
//! The platform's durable key-value store (whatever that is on the device)
//! sits behind [`DraftStorage`]; the store never touches it except through
//! explicit serialize/deserialize at this seam.

use std::collections::HashMap;
use thiserror::Error;

/// The underlying key-value store failed to read or write.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Draft storage failure: {0}")]
pub struct StorageError(pub String);

/// Durable string key-value storage.
pub trait DraftStorage: Send {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: DraftStorage + ?Sized> DraftStorage for &mut T {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory [`DraftStorage`], for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryDraftStorage {
    entries: HashMap<String, String>,
}

impl MemoryDraftStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStorage for MemoryDraftStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}
