//! Host collaborators.
//!
//! The bridge never talks to the operating system, the recognition engine,
//! or the bundled asset store directly. It goes through the traits in this
//! module, which the embedding shell implements for its platform.
//!
//! Two filesystem-backed implementations ship with the crate:
//!
//! - [`DirectoryAssetSource`]: bundled assets rooted at a directory.
//! - [`FileProviderResolver`]: maps paths under named roots to
//!   `content://<authority>/<root>/<relative>` references.

mod assets;
mod file_provider;
mod traits;

pub use assets::DirectoryAssetSource;
pub use file_provider::FileProviderResolver;
pub use traits::{ActivityLauncher, AssetSource, ContentResolver, RecognitionEngine};

use std::sync::Arc;

/// The set of host collaborators a bridge is wired to.
#[derive(Clone)]
pub struct Collaborators {
    /// Text recognition engine.
    pub engine: Arc<dyn RecognitionEngine>,
    /// Bundled read-only asset store.
    pub assets: Arc<dyn AssetSource>,
    /// Path to content-reference resolver.
    pub resolver: Arc<dyn ContentResolver>,
    /// Activity launcher.
    pub launcher: Arc<dyn ActivityLauncher>,
}

impl Collaborators {
    /// Bundles the four collaborators.
    #[must_use]
    pub fn new(
        engine: Arc<dyn RecognitionEngine>,
        assets: Arc<dyn AssetSource>,
        resolver: Arc<dyn ContentResolver>,
        launcher: Arc<dyn ActivityLauncher>,
    ) -> Self {
        Self {
            engine,
            assets,
            resolver,
            launcher,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("engine", &self.engine.name())
            .finish_non_exhaustive()
    }
}
