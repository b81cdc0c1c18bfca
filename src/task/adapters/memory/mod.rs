//! In-memory adapters for tests and ephemeral sessions.

mod blob_store;

pub use blob_store::InMemoryBlobStore;
