//! # capbridge
//!
//! Native capability bridge for cross-platform application shells.
//!
//! The application layer calls one promise-shaped contract,
//! [`CapabilityBridge::invoke`], with an operation name and positional
//! arguments. The bridge routes the call to one of three independent
//! capability modules:
//!
//! - **Text recognition**: decode an image and run it through a
//!   [`RecognitionEngine`] configured for a script profile.
//! - **Asset materialization**: copy a bundled read-only asset to a writable
//!   destination on a background worker.
//! - **Resource access**: turn a local path into an opaque, permission-scoped
//!   content reference and ask the host to view or share it.
//!
//! Host-owned machinery (activity launch, content resolution, the OCR engine,
//! the bundled asset store) sits behind the traits in [`host`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use capbridge::{BridgeConfig, CapabilityBridge, Collaborators};
//! use serde_json::json;
//!
//! let bridge = CapabilityBridge::new(BridgeConfig::from_env(), collaborators);
//! let result = bridge
//!     .invoke("unpackAsset", vec![json!("tokenizer.json"), json!("/data/app/tokenizer.json")])
//!     .await;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod bridge;
pub mod config;
pub mod host;
pub mod models;
pub mod observability;
pub mod services;

pub use bridge::{CapabilityBridge, OperationInfo};
pub use config::BridgeConfig;
pub use host::{
    ActivityLauncher, AssetSource, Collaborators, ContentResolver, DirectoryAssetSource,
    FileProviderResolver, RecognitionEngine,
};
pub use models::{
    AssetCopyJob, CapabilityRequest, CapabilityResult, ContentUri, FailureKind, HostIntent,
    IntentAction, IntentFlag, RecognitionOutcome, ResourceReference, ScriptProfile,
};

/// Error type for capability operations.
///
/// Every variant except [`Error::OperationFailed`] corresponds to one
/// [`FailureKind`] reported to the application layer.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `ImageDecode` | The image file is missing, unreadable, or not a decodable image |
/// | `Recognition` | The recognition engine fails or its worker dies |
/// | `UnpackAsset` | The asset cannot be opened, read, or written to the destination |
/// | `UnsupportedOperation` | The operation name is not in the catalog |
/// | `InvalidArgument` | A positional argument is missing or has the wrong type |
/// | `Resolve` | A path cannot be turned into a content reference |
/// | `Dispatch` | The host refuses or fails to start an activity |
/// | `OperationFailed` | Process-level setup fails (logging, configuration) |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The image could not be opened or decoded.
    #[error("cannot decode image '{reference}': {cause}")]
    ImageDecode {
        /// The image reference as given by the caller.
        reference: String,
        /// The underlying cause.
        cause: String,
    },

    /// The recognition engine failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Copying a bundled asset failed.
    ///
    /// The destination may hold a partial file or no file at all.
    #[error("cannot unpack asset '{asset}' to '{destination}': {cause}")]
    UnpackAsset {
        /// The asset name.
        asset: String,
        /// The destination path.
        destination: String,
        /// The underlying cause.
        cause: String,
    },

    /// The operation name is unknown.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A positional argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A local path could not be resolved to a content reference.
    #[error("cannot resolve '{reference}' to a content reference: {cause}")]
    Resolve {
        /// The reference that failed to resolve.
        reference: String,
        /// The underlying cause.
        cause: String,
    },

    /// The host failed to start an activity.
    #[error("host action '{action}' failed: {cause}")]
    Dispatch {
        /// The intent action that was attempted.
        action: String,
        /// The underlying cause.
        cause: String,
    },

    /// A process-level operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Returns the failure kind reported to the application layer.
    ///
    /// `OperationFailed` never crosses the dispatcher; it is reported as a
    /// dispatch failure if it ever does.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::ImageDecode { .. } => FailureKind::ImageError,
            Self::Recognition(_) => FailureKind::OcrError,
            Self::UnpackAsset { .. } => FailureKind::UnpackAssetError,
            Self::UnsupportedOperation(_) => FailureKind::UnsupportedOperation,
            Self::InvalidArgument(_) => FailureKind::InvalidArgument,
            Self::Resolve { .. } => FailureKind::ResolveError,
            Self::Dispatch { .. } | Self::OperationFailed { .. } => FailureKind::DispatchError,
        }
    }
}

/// Result type alias for capability operations.
pub type Result<T> = std::result::Result<T, Error>;
