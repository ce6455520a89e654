//! Collaborator traits.

use crate::Result;
use crate::models::{ContentUri, HostIntent, ScriptProfile};
use image::DynamicImage;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Text recognition engine.
///
/// Calls are blocking; the bridge runs them on a blocking worker.
pub trait RecognitionEngine: Send + Sync {
    /// The engine name, for logs.
    fn name(&self) -> &'static str;

    /// Recognizes text in `image` using the given script profile.
    ///
    /// Returning an empty string means no text was found and is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if recognition fails. Any error is reported to the
    /// caller as an `OCR_ERROR`.
    fn recognize(&self, image: &DynamicImage, profile: ScriptProfile) -> Result<String>;
}

/// Read-only store of assets bundled with the application.
pub trait AssetSource: Send + Sync {
    /// Opens the asset at `logical_path` (e.g. `models/tokenizer.json`) as a
    /// byte stream.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the asset does not exist or cannot be opened.
    fn open(&self, logical_path: &str) -> std::io::Result<Box<dyn Read + Send>>;
}

/// Converts local paths into opaque, permission-scoped content references.
pub trait ContentResolver: Send + Sync {
    /// Resolves `path` to a content reference owned by this application.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resolve` if the path is not shareable.
    fn content_uri_for(&self, path: &Path) -> Result<ContentUri>;

    /// Maps a content reference back to a local path, if this resolver
    /// issued it.
    fn open_path(&self, _uri: &ContentUri) -> Option<PathBuf> {
        None
    }
}

/// Starts host activities.
pub trait ActivityLauncher: Send + Sync {
    /// Asks the host to start the activity described by `intent`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Dispatch` if no activity handles the intent or the
    /// host refuses it.
    fn start_activity(&self, intent: &HostIntent) -> Result<()>;

    /// Returns true if the host has an all-files-access permission screen.
    fn supports_all_files_access(&self) -> bool {
        true
    }
}
