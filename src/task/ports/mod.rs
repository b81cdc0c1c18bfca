//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod blob_store;

pub use blob_store::{BlobKey, BlobStore, BlobStoreError, BlobStoreResult};
