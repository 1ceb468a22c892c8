//! Temporary token store helper
//!
//! A [`FileTokenStore`] rooted in a directory that is removed on drop.

#![allow(clippy::missing_errors_doc)]

use std::io;
use std::path::Path;

use tempfile::TempDir;

use crate::auth::FileTokenStore;

/// File-backed token store living in its own temporary directory
#[derive(Debug)]
pub struct TempTokenStore {
    dir: TempDir,
    store: FileTokenStore,
}

impl TempTokenStore {
    /// Create a store at `<tempdir>/data/psn_tokens.json`. The `data`
    /// directory is not created up front.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("psnlink-tokens").tempdir()?;
        let store = FileTokenStore::new(dir.path().join("data").join("psn_tokens.json"));
        Ok(Self { dir, store })
    }

    #[must_use]
    pub fn store(&self) -> &FileTokenStore {
        &self.store
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
