//! Scheme-tagged resource references.
//!
//! A [`ResourceReference`] is parsed once from the caller's string and
//! normalized through a [`ContentResolver`] into a [`ContentUri`] before any
//! action that crosses a process boundary.

use crate::host::ContentResolver;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Scheme of host-issued opaque references.
pub const CONTENT_SCHEME: &str = "content://";

/// Prefix of file URIs accepted in place of raw paths.
pub const FILE_URI_PREFIX: &str = "file://";

/// An opaque, permission-scoped content reference (`content://authority/...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentUri(String);

impl ContentUri {
    /// Wraps a `content://` string.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the string does not carry the
    /// content scheme or has no authority.
    pub fn parse(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        let Some(rest) = uri.strip_prefix(CONTENT_SCHEME) else {
            return Err(Error::InvalidArgument(format!(
                "not a content reference: {uri}"
            )));
        };
        if rest.is_empty() || rest.starts_with('/') {
            return Err(Error::InvalidArgument(format!(
                "content reference has no authority: {uri}"
            )));
        }
        Ok(Self(uri))
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the authority component.
    #[must_use]
    pub fn authority(&self) -> &str {
        let rest = self.0.strip_prefix(CONTENT_SCHEME).unwrap_or_default();
        rest.split('/').next().unwrap_or(rest)
    }
}

impl TryFrom<String> for ContentUri {
    type Error = Error;

    fn try_from(uri: String) -> Result<Self> {
        Self::parse(uri)
    }
}

impl From<ContentUri> for String {
    fn from(uri: ContentUri) -> Self {
        uri.0
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A filesystem resource reference, tagged by the scheme it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceReference {
    /// A plain local path.
    RawPath(PathBuf),
    /// A `file://` URI; holds the path with the prefix stripped.
    FileUri(PathBuf),
    /// A host-issued opaque reference.
    Opaque(ContentUri),
}

impl ResourceReference {
    /// Parses a caller-supplied string by scheme.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for an empty string or a malformed
    /// `content://` reference.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidArgument(
                "resource reference is empty".to_string(),
            ));
        }
        if raw.starts_with(CONTENT_SCHEME) {
            return ContentUri::parse(raw).map(Self::Opaque);
        }
        if let Some(path) = raw.strip_prefix(FILE_URI_PREFIX) {
            return Ok(Self::FileUri(PathBuf::from(path)));
        }
        Ok(Self::RawPath(PathBuf::from(raw)))
    }

    /// Returns the local path for path-tagged references.
    #[must_use]
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Self::RawPath(path) | Self::FileUri(path) => Some(path),
            Self::Opaque(_) => None,
        }
    }

    /// Returns true if the reference is already opaque.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }

    /// Normalizes the reference into a content reference.
    ///
    /// Opaque references pass through untouched and the resolver is not
    /// consulted.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resolve` if the resolver cannot map the path.
    pub fn normalize(&self, resolver: &dyn ContentResolver) -> Result<ContentUri> {
        match self {
            Self::Opaque(uri) => Ok(uri.clone()),
            Self::RawPath(path) | Self::FileUri(path) => {
                resolver
                    .content_uri_for(path)
                    .map_err(|e| match e {
                        resolve @ Error::Resolve { .. } => resolve,
                        other => Error::Resolve {
                            reference: self.to_string(),
                            cause: other.to_string(),
                        },
                    })
            },
        }
    }
}

impl fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RawPath(path) => write!(f, "{}", path.display()),
            Self::FileUri(path) => write!(f, "{FILE_URI_PREFIX}{}", path.display()),
            Self::Opaque(uri) => write!(f, "{uri}"),
        }
    }
}
