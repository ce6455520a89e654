//! Observability: structured logging and request correlation.

mod logging;
mod request_context;

pub use logging::{LogFormat, LoggingConfig};
pub use request_context::{
    RequestContext, RequestContextGuard, WorkerContext, current_request_context,
    current_request_id, enter_request_context, scope_request_context,
};

use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry, fmt};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initializes logging from environment variables.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed or the log
/// file cannot be opened.
pub fn init_from_env() -> Result<()> {
    init(LoggingConfig::from_env())
}

/// Installs the global `tracing` subscriber.
///
/// Output goes to stderr, or is appended to `config.file` without ANSI
/// colors. May succeed once per process.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed or the log
/// file cannot be opened.
pub fn init(config: LoggingConfig) -> Result<()> {
    let LoggingConfig {
        format,
        filter,
        file,
    } = config;

    let (writer, ansi) = match file.as_deref() {
        Some(path) => (BoxMakeWriter::new(Arc::new(open_log_file(path)?)), false),
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let base = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_thread_names(true);
    let layer: BoxedLayer = match format {
        LogFormat::Json => base
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Pretty => base.pretty().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| logging_failed("logging_init", e.to_string()))
}

/// Opens `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| logging_failed("create_log_dir", format!("{}: {e}", parent.display())))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| logging_failed("open_log_file", format!("{}: {e}", path.display())))
}

fn logging_failed(operation: &str, cause: String) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause,
    }
}
