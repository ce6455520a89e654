//! Operation names.
//!
//! Replaces string matching at the call site with an enum. Unknown names are
//! captured so the dispatcher can report them.

use std::fmt;

/// A capability operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Recognize text in an image.
    ScanImage,
    /// Copy a bundled asset to a writable path.
    UnpackAsset,
    /// Open a document in the host viewer.
    ViewDocument,
    /// Present the host share chooser for an image.
    ShareImage,
    /// Show the all-files-access settings screen.
    OpenAllFilesAccessSettings,
    /// Anything else.
    Unknown(String),
}

impl Operation {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::ScanImage => "scanImage",
            Self::UnpackAsset => "unpackAsset",
            Self::ViewDocument => "viewDocument",
            Self::ShareImage => "shareImage",
            Self::OpenAllFilesAccessSettings => "openAllFilesAccessSettings",
            Self::Unknown(s) => s.as_str(),
        }
    }

    /// Returns true if this is a known operation.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Returns all known operations.
    #[must_use]
    pub const fn known_operations() -> &'static [Self] {
        &[
            Self::ScanImage,
            Self::UnpackAsset,
            Self::ViewDocument,
            Self::ShareImage,
            Self::OpenAllFilesAccessSettings,
        ]
    }

    /// Returns a bounded label for metrics.
    #[must_use]
    pub const fn metric_label(&self) -> &'static str {
        match self {
            Self::ScanImage => "scanImage",
            Self::UnpackAsset => "unpackAsset",
            Self::ViewDocument => "viewDocument",
            Self::ShareImage => "shareImage",
            Self::OpenAllFilesAccessSettings => "openAllFilesAccessSettings",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<&str> for Operation {
    fn from(s: &str) -> Self {
        match s {
            "scanImage" => Self::ScanImage,
            "unpackAsset" => Self::UnpackAsset,
            // `openPDF` is the name older shells call.
            "viewDocument" | "openPDF" => Self::ViewDocument,
            "shareImage" => Self::ShareImage,
            "openAllFilesAccessSettings" => Self::OpenAllFilesAccessSettings,
            unknown => Self::Unknown(unknown.to_string()),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
