//! Text recognition.
//!
//! One image in, one text result out, one round trip to the engine. The
//! image is decoded and recognized on a blocking worker so the dispatching
//! task never waits on file I/O or the engine.

use crate::host::{ContentResolver, RecognitionEngine};
use crate::models::{RecognitionOutcome, ResourceReference, ScriptProfile};
use crate::observability::WorkerContext;
use crate::{Error, Result};
use image::{DynamicImage, ImageReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::instrument;

/// Converts image references into recognized text.
#[derive(Clone)]
pub struct TextRecognitionService {
    engine: Arc<dyn RecognitionEngine>,
    resolver: Arc<dyn ContentResolver>,
}

impl TextRecognitionService {
    /// Creates the service.
    #[must_use]
    pub fn new(engine: Arc<dyn RecognitionEngine>, resolver: Arc<dyn ContentResolver>) -> Self {
        Self { engine, resolver }
    }

    /// Recognizes text in the image at `image_reference`.
    ///
    /// Accepts raw paths, `file://` URIs, and `content://` references this
    /// application's resolver can map back to a local file.
    ///
    /// # Errors
    ///
    /// - `Error::ImageDecode` if the image cannot be located, opened, or decoded.
    /// - `Error::Recognition` if the engine fails.
    #[instrument(skip(self), fields(operation = "scan_image", engine = self.engine.name()))]
    pub async fn scan_image(
        &self,
        image_reference: &str,
        profile: ScriptProfile,
    ) -> Result<RecognitionOutcome> {
        let path = self.local_image_path(image_reference)?;
        let engine = Arc::clone(&self.engine);
        let reference = image_reference.to_string();
        let worker = WorkerContext::capture();

        let text = tokio::task::spawn_blocking(move || {
            worker.run(|| {
                let image = decode_image(&path, &reference).inspect_err(|e| {
                    tracing::warn!(error = %e, "Image could not be decoded");
                })?;
                tracing::debug!(
                    width = image.width(),
                    height = image.height(),
                    %profile,
                    "Image decoded, running recognizer"
                );
                engine.recognize(&image, profile).map_err(|e| match e {
                    recognition @ Error::Recognition(_) => recognition,
                    other => Error::Recognition(other.to_string()),
                })
            })
        })
        .await
        .map_err(|e| Error::Recognition(format!("recognition worker failed: {e}")))??;

        tracing::info!(chars = text.chars().count(), %profile, "Text recognized");
        Ok(RecognitionOutcome { text })
    }

    fn local_image_path(&self, image_reference: &str) -> Result<PathBuf> {
        let decode_error = |cause: &str| Error::ImageDecode {
            reference: image_reference.to_string(),
            cause: cause.to_string(),
        };

        match ResourceReference::parse(image_reference).map_err(|e| decode_error(&e.to_string()))? {
            ResourceReference::RawPath(path) | ResourceReference::FileUri(path) => Ok(path),
            ResourceReference::Opaque(uri) => self
                .resolver
                .open_path(&uri)
                .ok_or_else(|| decode_error("content reference is not readable by this application")),
        }
    }
}

/// Opens and decodes an image, sniffing the format from its bytes.
fn decode_image(path: &Path, reference: &str) -> Result<DynamicImage> {
    let decode_error = |cause: String| Error::ImageDecode {
        reference: reference.to_string(),
        cause,
    };

    ImageReader::open(path)
        .map_err(|e| decode_error(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?
        .decode()
        .map_err(|e| decode_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FileProviderResolver;
    use image::{ImageBuffer, Rgb};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Engine that records the profiles it was asked for.
    struct StubEngine {
        reply: std::result::Result<String, String>,
        seen: Mutex<Vec<(u32, u32, ScriptProfile)>>,
    }

    impl StubEngine {
        fn replying(reply: std::result::Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl RecognitionEngine for StubEngine {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn recognize(&self, image: &DynamicImage, profile: ScriptProfile) -> Result<String> {
            self.seen
                .lock()
                .unwrap()
                .push((image.width(), image.height(), profile));
            self.reply.clone().map_err(Error::Recognition)
        }
    }

    fn write_png(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(4, 3, Rgb([255, 255, 255]));
        img.save(&path).unwrap();
        path
    }

    fn service(engine: Arc<StubEngine>, dir: &TempDir) -> TextRecognitionService {
        let resolver = FileProviderResolver::new("app.fileprovider").with_root("files", dir.path());
        TextRecognitionService::new(engine, Arc::new(resolver))
    }

    #[tokio::test]
    async fn test_scan_returns_engine_text() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "page.png");
        let engine = StubEngine::replying(Ok("नमस्ते"));
        let svc = service(Arc::clone(&engine), &dir);

        let outcome = svc
            .scan_image(path.to_str().unwrap(), ScriptProfile::Devanagari)
            .await
            .unwrap();
        assert_eq!(outcome.text, "नमस्ते");
        assert_eq!(
            engine.seen.lock().unwrap().as_slice(),
            &[(4, 3, ScriptProfile::Devanagari)]
        );
    }

    #[tokio::test]
    async fn test_empty_text_is_success() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "blank.png");
        let svc = service(StubEngine::replying(Ok("")), &dir);

        let outcome = svc
            .scan_image(&format!("file://{}", path.display()), ScriptProfile::Latin)
            .await
            .unwrap();
        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_image_error() {
        let dir = TempDir::new().unwrap();
        let engine = StubEngine::replying(Ok("never"));
        let svc = service(Arc::clone(&engine), &dir);

        let err = svc
            .scan_image("/tmp/missing-capbridge-test.png", ScriptProfile::Latin)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ImageDecode { .. }));
        assert!(engine.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_image_is_image_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"this is not an image").unwrap();
        let svc = service(StubEngine::replying(Ok("never")), &dir);

        let err = svc
            .scan_image(path.to_str().unwrap(), ScriptProfile::Latin)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ImageDecode { .. }));
    }

    #[tokio::test]
    async fn test_engine_failure_is_recognition_error() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "page.png");
        let svc = service(StubEngine::replying(Err("model missing")), &dir);

        let err = svc
            .scan_image(path.to_str().unwrap(), ScriptProfile::Latin)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Recognition(ref msg) if msg == "model missing"));
    }

    #[tokio::test]
    async fn test_own_content_reference_is_readable() {
        let dir = TempDir::new().unwrap();
        write_png(&dir, "shot.png");
        let svc = service(StubEngine::replying(Ok("ok")), &dir);

        let outcome = svc
            .scan_image("content://app.fileprovider/files/shot.png", ScriptProfile::Latin)
            .await
            .unwrap();
        assert_eq!(outcome.text, "ok");
    }

    #[tokio::test]
    async fn test_foreign_content_reference_is_image_error() {
        let dir = TempDir::new().unwrap();
        let svc = service(StubEngine::replying(Ok("never")), &dir);

        let err = svc
            .scan_image("content://media/external/images/7", ScriptProfile::Latin)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ImageDecode { .. }));
    }
}
