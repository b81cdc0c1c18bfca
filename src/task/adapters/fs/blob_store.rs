//! Directory-backed blob store.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::task::ports::{BlobKey, BlobStore, BlobStoreError, BlobStoreResult};

/// Blob store keeping one `<key>.json` file per blob inside a directory.
///
/// All file access goes through a capability handle on the directory, so
/// keys can never address files outside it. Writes go to a temporary file
/// that is renamed over the target, so readers see either the previous or
/// the new contents.
#[derive(Debug)]
pub struct DirectoryBlobStore {
    dir: Dir,
}

impl DirectoryBlobStore {
    /// Opens (creating if needed) the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Utf8Path) -> BlobStoreResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(BlobStoreError::io)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(BlobStoreError::io)?;
        Ok(Self { dir })
    }

    /// Wraps an already opened directory capability.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

fn file_name(key: &BlobKey) -> String {
    format!("{key}.json")
}

fn staging_name(key: &BlobKey) -> String {
    format!(".{key}.json.tmp")
}

impl BlobStore for DirectoryBlobStore {
    fn get(&self, key: &BlobKey) -> BlobStoreResult<Option<Vec<u8>>> {
        match self.dir.read(file_name(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(BlobStoreError::io(err)),
        }
    }

    fn set(&self, key: &BlobKey, bytes: &[u8]) -> BlobStoreResult<()> {
        let staging = staging_name(key);
        self.dir
            .write(&staging, bytes)
            .map_err(BlobStoreError::io)?;
        self.dir
            .rename(&staging, &self.dir, file_name(key))
            .map_err(BlobStoreError::io)
    }
}
