//! Error types for the draft order store.

use thiserror::Error;

use super::storage::StorageError;

/// Errors that can occur while mutating or persisting the draft.
#[derive(Debug, Error)]
pub enum DraftStoreError {
    /// The caller addressed an item index that no longer exists. Remember
    /// that removing index `i` shifts every later item down by one.
    #[error("No draft item at index {index} (draft has {len} items)")]
    ItemIndexOutOfBounds { index: usize, len: usize },

    /// The durable key-value store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The persisted draft payload could not be encoded or decoded.
    #[error("Draft serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}
