//! File-provider style content resolution.
//!
//! Paths are shareable only if they fall under one of the configured named
//! roots. A path `<root>/a/b.pdf` under the root named `docs` becomes
//! `content://<authority>/docs/a/b.pdf`, with each segment percent-encoded.

use super::ContentResolver;
use crate::models::ContentUri;
use crate::{Error, Result};
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Resolves local paths under named roots into `content://` references.
#[derive(Debug, Clone)]
pub struct FileProviderResolver {
    authority: String,
    roots: Vec<(String, PathBuf)>,
}

impl FileProviderResolver {
    /// Creates a resolver issuing references for `authority`.
    #[must_use]
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            roots: Vec::new(),
        }
    }

    /// Adds a named root directory.
    #[must_use]
    pub fn with_root(mut self, name: impl Into<String>, dir: impl AsRef<Path>) -> Self {
        self.roots
            .push((name.into(), lexical_normalize(dir.as_ref())));
        self
    }

    /// Returns the authority.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Finds the most specific root containing `path`.
    fn root_for(&self, path: &Path) -> Option<(&str, &Path)> {
        self.roots
            .iter()
            .filter(|(_, dir)| path.starts_with(dir))
            .max_by_key(|(_, dir)| dir.components().count())
            .map(|(name, dir)| (name.as_str(), dir.as_path()))
    }

    fn resolve_error(path: &Path, cause: impl Into<String>) -> Error {
        Error::Resolve {
            reference: path.display().to_string(),
            cause: cause.into(),
        }
    }
}

impl ContentResolver for FileProviderResolver {
    fn content_uri_for(&self, path: &Path) -> Result<ContentUri> {
        if !path.is_absolute() {
            return Err(Self::resolve_error(path, "path must be absolute"));
        }
        let normalized = lexical_normalize(path);
        let Some((name, root)) = self.root_for(&normalized) else {
            return Err(Self::resolve_error(
                path,
                "path is outside every shareable root",
            ));
        };
        let relative = normalized
            .strip_prefix(root)
            .map_err(|e| Self::resolve_error(path, e.to_string()))?;

        let mut url = Url::parse(&format!("content://{}/", self.authority))
            .map_err(|e| Self::resolve_error(path, format!("invalid authority: {e}")))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Self::resolve_error(path, "authority cannot carry a path"))?;
            segments.pop_if_empty().push(name);
            for component in relative.components() {
                segments.push(&component.as_os_str().to_string_lossy());
            }
        }

        ContentUri::parse(url.to_string())
    }

    fn open_path(&self, uri: &ContentUri) -> Option<PathBuf> {
        let url = Url::parse(uri.as_str()).ok()?;
        if url.host_str() != Some(self.authority.as_str()) {
            return None;
        }
        let mut segments = url.path_segments()?;
        let name = segments.next()?;
        let (_, root) = self.roots.iter().find(|(root_name, _)| root_name == name)?;

        let mut path = root.clone();
        for segment in segments.filter(|s| !s.is_empty()) {
            let decoded = percent_decode_str(segment).decode_utf8().ok()?;
            if decoded == ".." || decoded.contains('/') {
                return None;
            }
            path.push(decoded.as_ref());
        }
        Some(path)
    }
}

/// Resolves `.` and `..` components without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                out.pop();
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
