//! Directory-backed snapshot store.
//!
//! Each key is stored as `<key>.json` inside one capability-scoped
//! directory. Writes go to `<key>.json.tmp` first and are renamed into place
//! so a crash never leaves a half-written snapshot behind.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

use crate::workspace::ports::{SnapshotStore, SnapshotStoreError, SnapshotStoreResult, StorageKey};

/// Snapshot store writing one JSON file per key.
#[derive(Debug)]
pub struct DirectorySnapshotStore {
    dir: Dir,
    root: Utf8PathBuf,
}

impl DirectorySnapshotStore {
    /// Opens `root`, creating it and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Persistence`] when the directory cannot
    /// be created or opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> SnapshotStoreResult<Self> {
        let root_path = root.as_ref();
        Dir::create_ambient_dir_all(root_path, ambient_authority())
            .map_err(SnapshotStoreError::persistence)?;
        let dir = Dir::open_ambient_dir(root_path, ambient_authority())
            .map_err(SnapshotStoreError::persistence)?;
        Ok(Self {
            dir,
            root: root_path.to_owned(),
        })
    }

    /// Returns the directory the store writes into.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

fn snapshot_file(key: &StorageKey) -> String {
    format!("{key}.json")
}

impl SnapshotStore for DirectorySnapshotStore {
    fn load(&self, key: &StorageKey) -> SnapshotStoreResult<Option<String>> {
        match self.dir.read_to_string(snapshot_file(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SnapshotStoreError::persistence(err)),
        }
    }

    fn save(&self, key: &StorageKey, payload: &str) -> SnapshotStoreResult<()> {
        let target = snapshot_file(key);
        let staging = format!("{target}.tmp");
        self.dir
            .write(&staging, payload)
            .map_err(SnapshotStoreError::persistence)?;
        self.dir
            .rename(&staging, &self.dir, &target)
            .map_err(SnapshotStoreError::persistence)
    }
}
