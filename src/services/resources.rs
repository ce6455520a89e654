//! Resource access: view, share, and all-files-access settings.
//!
//! View and share normalize the caller's reference into a content reference
//! first (Resolving), then hand an intent to the host (Dispatching). A
//! failure in either step ends the call; nothing is retried.
//!
//! Both steps call host collaborators inline on the dispatching task. A
//! collaborator panic is caught and reported as a failure of that step,
//! unless the build aborts on panic.

use crate::host::{ActivityLauncher, ContentResolver};
use crate::models::{
    CATEGORY_DEFAULT, ContentUri, HostIntent, IntentAction, IntentFlag, ResourceReference,
};
use crate::{Error, Result};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tracing::instrument;

/// MIME type used when viewing documents.
pub const DOCUMENT_MIME_TYPE: &str = "application/pdf";

/// MIME type used when sharing images.
pub const IMAGE_MIME_TYPE: &str = "image/*";

/// Title of the share-target chooser.
pub const SHARE_CHOOSER_TITLE: &str = "Share image";

/// Hands filesystem resources to host viewers and share targets.
#[derive(Clone)]
pub struct ResourceAccessService {
    resolver: Arc<dyn ContentResolver>,
    launcher: Arc<dyn ActivityLauncher>,
    app_id: String,
}

impl ResourceAccessService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        resolver: Arc<dyn ContentResolver>,
        launcher: Arc<dyn ActivityLauncher>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            launcher,
            app_id: app_id.into(),
        }
    }

    /// Normalizes a path or reference into a content reference.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for an empty or malformed reference
    /// and `Error::Resolve` if the path is not shareable.
    pub fn normalize(&self, path_or_reference: &str) -> Result<ContentUri> {
        let reference = ResourceReference::parse(path_or_reference)?;
        guard_host_call(
            || reference.normalize(self.resolver.as_ref()),
            |cause| Error::Resolve {
                reference: reference.to_string(),
                cause,
            },
        )
    }

    /// Opens a PDF document in the host viewer.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resolve` if the reference cannot be normalized and
    /// `Error::Dispatch` if the host cannot show it.
    #[instrument(skip(self), fields(operation = "view_document"))]
    pub fn view_document(&self, path_or_reference: &str) -> Result<()> {
        let uri = self.normalize(path_or_reference).inspect_err(|e| {
            tracing::warn!(error = %e, "Document reference could not be resolved");
        })?;

        let intent = HostIntent::new(IntentAction::View)
            .with_data(uri.as_str())
            .with_mime_type(DOCUMENT_MIME_TYPE)
            .with_flag(IntentFlag::NoHistory)
            .with_flag(IntentFlag::NewTask)
            .granting_read(uri.as_str());

        self.dispatch(&intent)
    }

    /// Presents the host share chooser for an image.
    ///
    /// # Errors
    ///
    /// Returns `Error::Resolve` if the reference cannot be normalized and
    /// `Error::Dispatch` if the host cannot present the chooser.
    #[instrument(skip(self), fields(operation = "share_image"))]
    pub fn share_image(&self, path_or_reference: &str) -> Result<()> {
        let uri = self.normalize(path_or_reference).inspect_err(|e| {
            tracing::warn!(error = %e, "Image reference could not be resolved");
        })?;

        let intent = HostIntent::new(IntentAction::Send)
            .with_mime_type(IMAGE_MIME_TYPE)
            .with_stream(uri.as_str())
            .with_flag(IntentFlag::NewTask)
            .granting_read(uri.as_str())
            .with_chooser(SHARE_CHOOSER_TITLE);

        self.dispatch(&intent)
    }

    /// Shows the all-files-access settings screen.
    ///
    /// Tries the per-app screen first and falls back to the generic list.
    /// Does nothing on hosts without the permission. Outcomes are only
    /// logged; callers must poll permission state themselves.
    #[instrument(skip(self), fields(operation = "open_all_files_access_settings"))]
    pub fn open_all_files_access_settings(&self) {
        if !self.launcher.supports_all_files_access() {
            tracing::debug!("Host has no all-files-access screen, skipping");
            return;
        }

        let primary = HostIntent::new(IntentAction::ManageAppAllFilesAccess)
            .with_category(CATEGORY_DEFAULT)
            .with_data(format!("package:{}", self.app_id))
            .with_flag(IntentFlag::NewTask);

        let Err(primary_err) = self.launch(&primary) else {
            return;
        };
        tracing::info!(error = %primary_err, "Per-app settings screen unavailable, using generic screen");

        let fallback =
            HostIntent::new(IntentAction::ManageAllFilesAccess).with_flag(IntentFlag::NewTask);
        if let Err(e) = self.launch(&fallback) {
            tracing::warn!(error = %e, "All-files-access settings screen could not be opened");
        }
    }

    fn launch(&self, intent: &HostIntent) -> Result<()> {
        guard_host_call(
            || self.launcher.start_activity(intent),
            |cause| Error::Dispatch {
                action: intent.action.to_string(),
                cause,
            },
        )
    }

    fn dispatch(&self, intent: &HostIntent) -> Result<()> {
        self.launch(intent).map_err(|e| {
            let err = match e {
                dispatch @ Error::Dispatch { .. } => dispatch,
                other => Error::Dispatch {
                    action: intent.action.to_string(),
                    cause: other.to_string(),
                },
            };
            tracing::warn!(error = %err, action = %intent.action, "Host action failed");
            err
        })
    }
}

/// Runs a collaborator call, turning a panic into `on_panic(message)`.
fn guard_host_call<T>(
    call: impl FnOnce() -> Result<T>,
    on_panic: impl FnOnce(String) -> Error,
) -> Result<T> {
    catch_unwind(AssertUnwindSafe(call))
        .unwrap_or_else(|payload| Err(on_panic(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .map_or_else(
            || "collaborator panicked".to_string(),
            |msg| format!("collaborator panicked: {msg}"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FileProviderResolver;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLauncher {
        started: Mutex<Vec<HostIntent>>,
        refuse: Vec<IntentAction>,
        unsupported: bool,
    }

    impl ActivityLauncher for RecordingLauncher {
        fn start_activity(&self, intent: &HostIntent) -> Result<()> {
            self.started.lock().unwrap().push(intent.clone());
            if self.refuse.contains(&intent.action) {
                return Err(Error::Dispatch {
                    action: intent.action.to_string(),
                    cause: "no activity found".to_string(),
                });
            }
            Ok(())
        }

        fn supports_all_files_access(&self) -> bool {
            !self.unsupported
        }
    }

    fn service(launcher: Arc<RecordingLauncher>) -> ResourceAccessService {
        let resolver = FileProviderResolver::new("app.fileprovider")
            .with_root("files", "/data/app/files");
        ResourceAccessService::new(Arc::new(resolver), launcher, "app")
    }

    #[test]
    fn test_view_document_builds_pdf_view_intent() {
        let launcher = Arc::new(RecordingLauncher::default());
        service(Arc::clone(&launcher))
            .view_document("/data/app/files/report.pdf")
            .unwrap();

        let started = launcher.started.lock().unwrap();
        assert_eq!(started.len(), 1);
        let intent = &started[0];
        assert_eq!(intent.action, IntentAction::View);
        assert_eq!(
            intent.data.as_deref(),
            Some("content://app.fileprovider/files/report.pdf")
        );
        assert_eq!(intent.mime_type.as_deref(), Some(DOCUMENT_MIME_TYPE));
        assert!(intent.has_flag(IntentFlag::GrantReadUriPermission));
        assert!(intent.has_flag(IntentFlag::NoHistory));
        assert!(intent.has_flag(IntentFlag::NewTask));
        assert_eq!(intent.clip_data, intent.data);
        assert_eq!(intent.chooser_title, None);
    }

    #[test]
    fn test_share_image_builds_chooser() {
        let launcher = Arc::new(RecordingLauncher::default());
        service(Arc::clone(&launcher))
            .share_image("file:///data/app/files/gallery/1.png")
            .unwrap();

        let started = launcher.started.lock().unwrap();
        let intent = &started[0];
        assert_eq!(intent.action, IntentAction::Send);
        assert_eq!(intent.mime_type.as_deref(), Some(IMAGE_MIME_TYPE));
        assert_eq!(
            intent.stream.as_deref(),
            Some("content://app.fileprovider/files/gallery/1.png")
        );
        assert_eq!(intent.clip_data, intent.stream);
        assert!(intent.has_flag(IntentFlag::GrantReadUriPermission));
        assert_eq!(intent.chooser_title.as_deref(), Some(SHARE_CHOOSER_TITLE));
    }

    #[test]
    fn test_unshareable_path_is_resolve_error_and_nothing_launched() {
        let launcher = Arc::new(RecordingLauncher::default());
        let err = service(Arc::clone(&launcher))
            .view_document("/etc/hosts")
            .unwrap_err();
        assert!(matches!(err, Error::Resolve { .. }));
        assert!(launcher.started.lock().unwrap().is_empty());
    }

    #[test]
    fn test_host_refusal_is_dispatch_error() {
        let launcher = Arc::new(RecordingLauncher {
            refuse: vec![IntentAction::View],
            ..RecordingLauncher::default()
        });
        let err = service(launcher)
            .view_document("content://app.fileprovider/files/x.pdf")
            .unwrap_err();
        assert!(matches!(err, Error::Dispatch { .. }));
    }

    struct PanickingResolver;

    impl ContentResolver for PanickingResolver {
        fn content_uri_for(&self, _path: &std::path::Path) -> Result<ContentUri> {
            panic!("resolver bug")
        }
    }

    struct PanickingLauncher;

    impl ActivityLauncher for PanickingLauncher {
        fn start_activity(&self, _intent: &HostIntent) -> Result<()> {
            panic!("{}", String::from("launcher bug"))
        }
    }

    #[test]
    fn test_resolver_panic_is_resolve_error() {
        let svc = ResourceAccessService::new(
            Arc::new(PanickingResolver),
            Arc::new(RecordingLauncher::default()),
            "app",
        );
        let err = svc.share_image("/data/app/files/1.png").unwrap_err();
        match err {
            Error::Resolve { cause, .. } => assert!(cause.contains("resolver bug")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_launcher_panic_is_dispatch_error() {
        let resolver = FileProviderResolver::new("app.fileprovider")
            .with_root("files", "/data/app/files");
        let svc = ResourceAccessService::new(Arc::new(resolver), Arc::new(PanickingLauncher), "app");

        let err = svc.view_document("/data/app/files/report.pdf").unwrap_err();
        match err {
            Error::Dispatch { action, cause } => {
                assert_eq!(action, IntentAction::View.as_str());
                assert!(cause.contains("launcher bug"));
            },
            other => panic!("unexpected error: {other}"),
        }
        // Settings navigation swallows the panic like any other failure.
        svc.open_all_files_access_settings();
    }

    #[test]
    fn test_settings_uses_app_screen_first() {
        let launcher = Arc::new(RecordingLauncher::default());
        service(Arc::clone(&launcher)).open_all_files_access_settings();

        let started = launcher.started.lock().unwrap();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].action, IntentAction::ManageAppAllFilesAccess);
        assert_eq!(started[0].data.as_deref(), Some("package:app"));
        assert_eq!(started[0].categories, vec![CATEGORY_DEFAULT.to_string()]);
    }

    #[test]
    fn test_settings_falls_back_to_generic_screen() {
        let launcher = Arc::new(RecordingLauncher {
            refuse: vec![IntentAction::ManageAppAllFilesAccess],
            ..RecordingLauncher::default()
        });
        service(Arc::clone(&launcher)).open_all_files_access_settings();

        let actions: Vec<IntentAction> = launcher
            .started
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.action)
            .collect();
        assert_eq!(
            actions,
            vec![
                IntentAction::ManageAppAllFilesAccess,
                IntentAction::ManageAllFilesAccess
            ]
        );
    }

    #[test]
    fn test_settings_noop_on_unsupported_host() {
        let launcher = Arc::new(RecordingLauncher {
            unsupported: true,
            ..RecordingLauncher::default()
        });
        service(Arc::clone(&launcher)).open_all_files_access_settings();
        assert!(launcher.started.lock().unwrap().is_empty());
    }
}
