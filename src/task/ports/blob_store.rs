//! Blob store port: opaque get/set of named byte strings.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for blob store operations.
pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

/// Name of a stored blob.
///
/// Keys are restricted to ASCII alphanumerics, `-` and `_` so every adapter
/// can map them onto its own namespace (file names, map keys) unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobKey(String);

impl BlobKey {
    /// Blob holding the serialized task collection.
    pub const TASKS: &'static str = "taskpilot-tasks";
    /// Blob holding the serialized category collection.
    pub const CATEGORIES: &'static str = "taskpilot-categories";

    /// Creates a validated key.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::InvalidKey`] for empty keys or keys with
    /// characters outside `[A-Za-z0-9_-]`.
    pub fn new(value: impl Into<String>) -> BlobStoreResult<Self> {
        let raw = value.into();
        let is_valid = !raw.is_empty()
            && raw
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if !is_valid {
            return Err(BlobStoreError::InvalidKey(raw));
        }
        Ok(Self(raw))
    }

    /// Key of the task collection blob.
    #[must_use]
    pub fn tasks() -> Self {
        Self(Self::TASKS.to_owned())
    }

    /// Key of the category collection blob.
    #[must_use]
    pub fn categories() -> Self {
        Self(Self::CATEGORIES.to_owned())
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persistent blob storage contract.
///
/// There are no transactions and no query capability: a blob is either
/// absent or holds the bytes of the last successful `set`.
pub trait BlobStore: Send + Sync {
    /// Reads a blob.
    ///
    /// Returns `Ok(None)` when nothing has been stored under the key.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Io`] when the medium cannot be read.
    fn get(&self, key: &BlobKey) -> BlobStoreResult<Option<Vec<u8>>>;

    /// Replaces a blob.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Io`] when the medium cannot be written.
    fn set(&self, key: &BlobKey, bytes: &[u8]) -> BlobStoreResult<()>;
}

/// Errors returned by blob store implementations.
#[derive(Debug, Clone, Error)]
pub enum BlobStoreError {
    /// The key contains characters outside the permitted set.
    #[error("invalid blob key: {0:?}")]
    InvalidKey(String),

    /// Storage medium failure.
    #[error("blob store I/O error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl BlobStoreError {
    /// Wraps a storage medium error.
    #[must_use]
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}
