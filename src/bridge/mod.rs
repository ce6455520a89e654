//! Capability dispatcher.
//!
//! # Architecture
//!
//! ```text
//! invoke(name, args)
//!   └── Operation::from(name)
//!         ├── ScanImage                  → TextRecognitionService
//!         ├── UnpackAsset                → AssetService
//!         ├── ViewDocument / ShareImage  → ResourceAccessService
//!         ├── OpenAllFilesAccessSettings → ResourceAccessService
//!         └── Unknown                    → UNSUPPORTED_OPERATION
//! ```
//!
//! Every path ends in a [`CapabilityResult`]; nothing escapes as a panic or
//! an untyped error. There are no retries at this layer.

mod args;
mod definitions;
mod dispatch;

pub use definitions::OperationInfo;
pub use dispatch::Operation;

use crate::config::BridgeConfig;
use crate::host::Collaborators;
use crate::models::{CapabilityRequest, CapabilityResult, FailureKind};
use crate::observability::{RequestContext, scope_request_context};
use crate::services::{AssetService, ResourceAccessService, TextRecognitionService};
use crate::{Error, Result};
use serde_json::Value;
use std::time::Instant;
use tracing::Instrument;

/// The bridge between the application layer and host capabilities.
#[derive(Clone)]
pub struct CapabilityBridge {
    config: BridgeConfig,
    recognition: TextRecognitionService,
    assets: AssetService,
    resources: ResourceAccessService,
}

impl CapabilityBridge {
    /// Wires the capability services to their host collaborators.
    #[must_use]
    pub fn new(config: BridgeConfig, collaborators: Collaborators) -> Self {
        let recognition = TextRecognitionService::new(
            collaborators.engine,
            std::sync::Arc::clone(&collaborators.resolver),
        );
        let assets = AssetService::new(
            collaborators.assets,
            config.asset_prefix.clone(),
            config.copy_buffer_size,
        );
        let resources = ResourceAccessService::new(
            collaborators.resolver,
            collaborators.launcher,
            config.app_id.clone(),
        );

        Self {
            config,
            recognition,
            assets,
            resources,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Returns the operation catalog.
    #[must_use]
    pub fn operations(&self) -> Vec<OperationInfo> {
        vec![
            definitions::scan_image(),
            definitions::unpack_asset(),
            definitions::view_document(),
            definitions::share_image(),
            definitions::open_all_files_access_settings(),
        ]
    }

    /// Invokes `operation` with positional `args`.
    ///
    /// Each call runs in its own request context; its correlation id appears
    /// on every log line the call produces.
    pub async fn invoke(&self, operation: &str, args: Vec<Value>) -> CapabilityResult {
        let op = Operation::from(operation);
        let context = RequestContext::new(op.as_str());
        let span = tracing::info_span!(
            "capability",
            operation = op.as_str(),
            request_id = context.request_id()
        );
        let label = op.metric_label();
        let start = Instant::now();

        let result = scope_request_context(context, self.route(op, &args))
            .instrument(span.clone())
            .await;

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        let outcome = result.failure_kind().map_or("success", |kind| kind.as_str());
        metrics::counter!(
            "capability_invocations_total",
            "operation" => label,
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!("capability_invocation_duration_ms", "operation" => label)
            .record(elapsed_ms);

        span.in_scope(|| match &result {
            CapabilityResult::Success { .. } => {
                tracing::debug!(elapsed_ms, "Capability call succeeded");
            },
            CapabilityResult::Failure { kind, message } => {
                tracing::warn!(code = %kind, message = %message, elapsed_ms, "Capability call failed");
            },
        });

        result
    }

    /// Invokes a decoded request.
    pub async fn invoke_request(&self, request: CapabilityRequest) -> CapabilityResult {
        self.invoke(&request.operation, request.args).await
    }

    /// Invokes a JSON-encoded request and returns the JSON-encoded result.
    ///
    /// A malformed request yields an `INVALID_ARGUMENT` failure.
    pub async fn invoke_json(&self, request: &str) -> String {
        let result = match serde_json::from_str::<CapabilityRequest>(request) {
            Ok(request) => self.invoke_request(request).await,
            Err(e) => CapabilityResult::failure(
                FailureKind::InvalidArgument,
                format!("malformed request: {e}"),
            ),
        };
        serde_json::to_string(&result).unwrap_or_else(|e| {
            format!(
                r#"{{"status":"failure","code":"{}","message":"result encoding failed: {}"}}"#,
                FailureKind::InvalidArgument,
                e.to_string().replace('"', "'")
            )
        })
    }

    async fn route(&self, op: Operation, args: &[Value]) -> CapabilityResult {
        match op {
            Operation::ScanImage => self.scan_image(args).await.into(),
            Operation::UnpackAsset => self.unpack_asset(args).await.into(),
            Operation::ViewDocument => self.view_document(args).into(),
            Operation::ShareImage => self.share_image(args).into(),
            Operation::OpenAllFilesAccessSettings => {
                self.resources.open_all_files_access_settings();
                CapabilityResult::success(Value::Null)
            },
            Operation::Unknown(name) => Error::UnsupportedOperation(name).into(),
        }
    }

    async fn scan_image(&self, args: &[Value]) -> Result<String> {
        let reference = args::required_str(args, 0, "imageReference")?;
        let profile = args::script_profile(args, 1, self.config.default_script)?;
        let outcome = self.recognition.scan_image(reference, profile).await?;
        Ok(outcome.text)
    }

    async fn unpack_asset(&self, args: &[Value]) -> Result<String> {
        let asset_name = args::required_str(args, 0, "assetName")?;
        let destination = args::required_str(args, 1, "destinationPath")?;
        self.assets.unpack_asset(asset_name, destination).await
    }

    fn view_document(&self, args: &[Value]) -> Result<Value> {
        let reference = args::required_str(args, 0, "pathOrReference")?;
        self.resources
            .view_document(reference)
            .map(|()| Value::Null)
    }

    fn share_image(&self, args: &[Value]) -> Result<Value> {
        let reference = args::required_str(args, 0, "pathOrReference")?;
        self.resources.share_image(reference).map(|()| Value::Null)
    }
}

impl std::fmt::Debug for CapabilityBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityBridge")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
