//! Invocation request and result types.

use crate::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A named operation with positional arguments, as sent by the application layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityRequest {
    /// Operation name (e.g. `scanImage`).
    pub operation: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<Value>,
}

impl CapabilityRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(operation: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            operation: operation.into(),
            args,
        }
    }
}

/// Stable failure codes reported to the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// The image could not be opened or decoded.
    ImageError,
    /// The recognition engine failed.
    OcrError,
    /// A bundled asset could not be copied.
    UnpackAssetError,
    /// The operation name is unknown.
    UnsupportedOperation,
    /// An argument was missing or malformed.
    InvalidArgument,
    /// A path could not be turned into a content reference.
    ResolveError,
    /// The host failed to start the requested action.
    DispatchError,
}

impl FailureKind {
    /// Returns the wire code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ImageError => "IMAGE_ERROR",
            Self::OcrError => "OCR_ERROR",
            Self::UnpackAssetError => "UNPACK_ASSET_ERROR",
            Self::UnsupportedOperation => "UNSUPPORTED_OPERATION",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::ResolveError => "RESOLVE_ERROR",
            Self::DispatchError => "DISPATCH_ERROR",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one invocation: exactly one of success or typed failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CapabilityResult {
    /// The operation completed.
    Success {
        /// Returned value (`null` for operations without one).
        value: Value,
    },
    /// The operation failed.
    Failure {
        /// Failure code.
        #[serde(rename = "code")]
        kind: FailureKind,
        /// Human-readable message.
        message: String,
    },
}

impl CapabilityResult {
    /// Creates a success result.
    #[must_use]
    pub fn success(value: impl Into<Value>) -> Self {
        Self::Success {
            value: value.into(),
        }
    }

    /// Creates a failure result.
    #[must_use]
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Returns true for `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the success value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the failure kind, if any.
    #[must_use]
    pub const fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<Error> for CapabilityResult {
    fn from(err: Error) -> Self {
        Self::failure(err.kind(), err.to_string())
    }
}

impl<T: Into<Value>> From<crate::Result<T>> for CapabilityResult {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(err) => err.into(),
        }
    }
}
