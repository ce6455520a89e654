//! Asset copy jobs.

use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// One background copy of a bundled asset to a writable destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCopyJob {
    /// Asset name as given by the caller.
    pub asset_name: String,
    /// Logical path inside the bundled asset namespace (`<prefix>/<name>`).
    pub source: String,
    /// Destination file path.
    pub destination: PathBuf,
}

impl AssetCopyJob {
    /// Builds a job for `asset_name` under `prefix`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnpackAsset` if the name is empty, absolute, or
    /// climbs out of the asset namespace.
    pub fn new(prefix: &str, asset_name: &str, destination: impl Into<PathBuf>) -> Result<Self> {
        let destination = destination.into();
        let reject = |cause: &str| Error::UnpackAsset {
            asset: asset_name.to_string(),
            destination: destination.display().to_string(),
            cause: cause.to_string(),
        };

        if asset_name.trim().is_empty() {
            return Err(reject("asset name is empty"));
        }
        let name_path = Path::new(asset_name);
        if !name_path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(reject("asset name must stay inside the asset namespace"));
        }

        let prefix = prefix.trim_matches('/');
        let source = if prefix.is_empty() {
            asset_name.to_string()
        } else {
            format!("{prefix}/{asset_name}")
        };

        Ok(Self {
            asset_name: asset_name.to_string(),
            source,
            destination,
        })
    }

    /// Returns the destination as the string reported back to the caller.
    #[must_use]
    pub fn destination_string(&self) -> String {
        self.destination.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_is_prefixed() {
        let job = AssetCopyJob::new("models", "tokenizer.json", "/data/app/tokenizer.json").unwrap();
        assert_eq!(job.source, "models/tokenizer.json");
        assert_eq!(job.destination_string(), "/data/app/tokenizer.json");
    }

    #[test]
    fn test_nested_asset_names_allowed() {
        let job = AssetCopyJob::new("/models/", "whisper/encoder.onnx", "/tmp/e.onnx").unwrap();
        assert_eq!(job.source, "models/whisper/encoder.onnx");
    }

    #[test]
    fn test_escaping_names_rejected() {
        for name in ["", "../secrets.db", "/etc/passwd", "a/../../b"] {
            assert!(
                matches!(
                    AssetCopyJob::new("models", name, "/tmp/out"),
                    Err(Error::UnpackAsset { .. })
                ),
                "{name:?} should be rejected"
            );
        }
    }
}
