//! Per-invocation context carrying a correlation id.
//!
//! The dispatcher scopes every invocation in a [`RequestContext`] so log
//! lines emitted by background workers can be tied back to the call that
//! started them.
//!
//! Blocking workers run on other threads, where neither the task-local
//! context nor the caller's span or thread-default subscriber exist.
//! [`WorkerContext`] carries all three across `spawn_blocking`.

use std::cell::RefCell;
use std::future::Future;
use tracing::{Dispatch, Span};
use uuid::Uuid;

/// Context for one capability invocation.
#[derive(Clone, Debug)]
pub struct RequestContext {
    request_id: String,
    operation: String,
}

impl RequestContext {
    /// Creates a context with a generated id.
    #[must_use]
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            operation: operation.into(),
        }
    }

    /// Creates a context with a caller-supplied id.
    #[must_use]
    pub fn from_id(request_id: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            operation: operation.into(),
        }
    }

    /// Returns the correlation id.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the operation name.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

tokio::task_local! {
    static TASK_CONTEXT: RequestContext;
}

thread_local! {
    static THREAD_CONTEXT: RefCell<Option<RequestContext>> = const { RefCell::new(None) };
}

/// Restores the previous thread-local context on drop.
pub struct RequestContextGuard {
    previous: Option<RequestContext>,
}

impl Drop for RequestContextGuard {
    fn drop(&mut self) {
        THREAD_CONTEXT.with(|slot| {
            *slot.borrow_mut() = self.previous.take();
        });
    }
}

/// Enters a context on the current thread (used inside blocking workers).
#[must_use]
pub fn enter_request_context(context: RequestContext) -> RequestContextGuard {
    let previous = THREAD_CONTEXT.with(|slot| slot.borrow_mut().replace(context));
    RequestContextGuard { previous }
}

/// Scopes a context across an async future.
pub async fn scope_request_context<F, T>(context: RequestContext, fut: F) -> T
where
    F: Future<Output = T>,
{
    TASK_CONTEXT.scope(context, fut).await
}

/// Returns the current context, task-local first, then thread-local.
#[must_use]
pub fn current_request_context() -> Option<RequestContext> {
    if let Ok(ctx) = TASK_CONTEXT.try_with(Clone::clone) {
        return Some(ctx);
    }
    THREAD_CONTEXT.with(|slot| slot.borrow().clone())
}

/// Returns the current correlation id, if any.
#[must_use]
pub fn current_request_id() -> Option<String> {
    current_request_context().map(|ctx| ctx.request_id)
}

/// Logging state of the calling task, captured for a blocking worker.
#[derive(Debug, Clone)]
pub struct WorkerContext {
    dispatch: Dispatch,
    parent: Span,
    request: Option<RequestContext>,
}

impl WorkerContext {
    /// Captures the current subscriber, span, and request context.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            dispatch: tracing::dispatcher::get_default(Dispatch::clone),
            parent: Span::current(),
            request: current_request_context(),
        }
    }

    /// Runs `work` on this thread under the captured state.
    ///
    /// Events emitted by `work` go to the caller's subscriber inside a
    /// `worker` span that carries the request id.
    pub fn run<T>(self, work: impl FnOnce() -> T) -> T {
        let Self {
            dispatch,
            parent,
            request,
        } = self;
        let _request = request.map(enter_request_context);

        tracing::dispatcher::with_default(&dispatch, || {
            let span = tracing::info_span!(
                parent: &parent,
                "worker",
                request_id = current_request_id().as_deref()
            );
            span.in_scope(work)
        })
    }
}
