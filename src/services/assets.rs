//! Bundled asset materialization.
//!
//! Copies `<prefix>/<asset>` from the bundled asset store to a writable
//! destination on a blocking worker. The destination is truncated and written
//! sequentially through a bounded buffer; there is no atomic rename, so a
//! failed copy may leave a partial file behind.
//!
//! Copies to the same destination path are serialized. Copies to different
//! destinations run independently.

use crate::host::AssetSource;
use crate::models::AssetCopyJob;
use crate::observability::WorkerContext;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::instrument;

/// Per-destination write locks.
///
/// Keys are destination paths as given; two spellings of the same file are
/// not recognized as one destination.
#[derive(Debug, Default)]
struct DestinationLocks {
    inner: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl DestinationLocks {
    fn lock_for(&self, destination: &Path) -> Arc<tokio::sync::Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        // Drop locks no in-flight copy holds.
        map.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(map.entry(destination.to_path_buf()).or_default())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Materializes bundled assets onto the writable filesystem.
#[derive(Clone)]
pub struct AssetService {
    source: Arc<dyn AssetSource>,
    prefix: String,
    buffer_size: usize,
    locks: Arc<DestinationLocks>,
}

impl AssetService {
    /// Creates the service.
    #[must_use]
    pub fn new(source: Arc<dyn AssetSource>, prefix: impl Into<String>, buffer_size: usize) -> Self {
        Self {
            source,
            prefix: prefix.into(),
            buffer_size: buffer_size.max(1),
            locks: Arc::new(DestinationLocks::default()),
        }
    }

    /// Copies the bundled asset `asset_name` to `destination`.
    ///
    /// Resolves with `destination` exactly as given once every byte has been
    /// written.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnpackAsset` if the asset name is invalid, the asset
    /// cannot be read, or the destination cannot be written.
    #[instrument(skip(self), fields(operation = "unpack_asset"))]
    pub async fn unpack_asset(&self, asset_name: &str, destination: &str) -> Result<String> {
        let job = AssetCopyJob::new(&self.prefix, asset_name, destination)?;

        let lock = self.locks.lock_for(&job.destination);
        let held = lock.lock_owned().await;

        let source = Arc::clone(&self.source);
        let buffer_size = self.buffer_size;
        let worker = WorkerContext::capture();
        let worker_job = job.clone();
        let start = Instant::now();

        let bytes = tokio::task::spawn_blocking(move || {
            let _held = held;
            worker.run(|| copy_asset(source.as_ref(), &worker_job, buffer_size))
        })
        .await
        .map_err(|e| unpack_error(&job, format!("copy worker failed: {e}")))??;

        metrics::counter!("asset_unpacked_bytes_total").increment(bytes);
        tracing::info!(
            asset = %job.source,
            destination = %job.destination.display(),
            bytes,
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Asset unpacked"
        );

        Ok(destination.to_string())
    }
}

fn unpack_error(job: &AssetCopyJob, cause: impl Into<String>) -> Error {
    Error::UnpackAsset {
        asset: job.asset_name.clone(),
        destination: job.destination_string(),
        cause: cause.into(),
    }
}

/// Streams the asset into the destination file. Returns bytes written.
fn copy_asset(source: &dyn AssetSource, job: &AssetCopyJob, buffer_size: usize) -> Result<u64> {
    let mut reader = source
        .open(&job.source)
        .map_err(|e| unpack_error(job, e.to_string()))?;
    let mut writer = File::create(&job.destination).map_err(|e| {
        unpack_error(job, format!("cannot create destination: {e}"))
    })?;

    let mut buf = vec![0_u8; buffer_size];
    let mut total: u64 = 0;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(bytes_written = total, error = %e, "Asset read failed mid-copy");
                return Err(unpack_error(job, format!("read failed: {e}")));
            },
        };
        writer.write_all(&buf[..n]).map_err(|e| {
            tracing::warn!(bytes_written = total, error = %e, "Destination write failed mid-copy");
            unpack_error(job, format!("write failed: {e}"))
        })?;
        total += n as u64;
    }

    writer
        .sync_all()
        .map_err(|e| unpack_error(job, format!("flush failed: {e}")))?;
    Ok(total)
}
