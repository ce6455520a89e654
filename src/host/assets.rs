//! Directory-backed bundled asset store.

use super::AssetSource;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Serves bundled assets from files under a root directory.
///
/// The logical path `models/tokenizer.json` maps to
/// `<root>/models/tokenizer.json`.
#[derive(Debug, Clone)]
pub struct DirectoryAssetSource {
    root: PathBuf,
}

impl DirectoryAssetSource {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectoryAssetSource {
    fn open(&self, logical_path: &str) -> io::Result<Box<dyn Read + Send>> {
        let path = self.root.join(logical_path.trim_start_matches('/'));
        if path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset '{logical_path}' is a directory"),
            ));
        }
        let file = File::open(&path).map_err(|e| {
            io::Error::new(e.kind(), format!("asset '{logical_path}': {e}"))
        })?;
        Ok(Box::new(file))
    }
}
