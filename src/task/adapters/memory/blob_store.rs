//! In-memory blob store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::ports::{BlobKey, BlobStore, BlobStoreError, BlobStoreResult};

/// Thread-safe in-memory blob store.
///
/// Clones share the same underlying map, so a test can keep a handle to
/// inspect or corrupt what a repository wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    blobs: Arc<RwLock<HashMap<BlobKey, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored blobs.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Io`] when lock acquisition fails.
    pub fn len(&self) -> BlobStoreResult<usize> {
        let blobs = self
            .blobs
            .read()
            .map_err(|err| BlobStoreError::io(std::io::Error::other(err.to_string())))?;
        Ok(blobs.len())
    }

    /// Returns whether nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Io`] when lock acquisition fails.
    pub fn is_empty(&self) -> BlobStoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl BlobStore for InMemoryBlobStore {
    fn get(&self, key: &BlobKey) -> BlobStoreResult<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|err| BlobStoreError::io(std::io::Error::other(err.to_string())))?;
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &BlobKey, bytes: &[u8]) -> BlobStoreResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|err| BlobStoreError::io(std::io::Error::other(err.to_string())))?;
        blobs.insert(key.clone(), bytes.to_vec());
        Ok(())
    }
}
