//! # Backstop
//!
//! **Fault interception for request/response middleware pipelines**
//!
//! Backstop sits at the edge of a middleware chain and guarantees that any
//! fault - a recoverable runtime error, an uncaught exception, or a fatal
//! termination condition - is captured exactly once, logged, normalized
//! into one canonical error model, and converted into a well-formed client
//! response, even when the fault occurred after partial processing or
//! during process teardown.
//!
//! ## How it works
//!
//! ```text
//! raw fault → classify/normalize → ErrorModel → compose response
//!                                                  ↓
//!                        client ← error-only queue ← pipeline restart
//! ```
//!
//! The host wires the interceptor's three entry points into its own hook
//! mechanism once at bootstrap and injects the collaborators (log sink,
//! pipeline engine, exchange tracker) at construction:
//!
//! ```
//! use backstop::{ErrorQueue, FaultInterceptor, JsonRenderStage, PipelineEngine};
//! use backstop::{ExceptionFault, FaultError, Request, Response};
//! use std::sync::Arc;
//!
//! struct Engine {
//!     queue: ErrorQueue,
//! }
//!
//! impl PipelineEngine for Engine {
//!     fn prepare_error_queue(&self) {}
//!     fn invoke(&self, request: Request, response: Response) -> Response {
//!         self.queue.run(&request, response)
//!     }
//! }
//!
//! let engine = Arc::new(Engine {
//!     queue: ErrorQueue::new().with_stage(JsonRenderStage),
//! });
//! let interceptor = FaultInterceptor::builder(engine).build();
//!
//! // A domain error keeps its own status and presentation.
//! interceptor.handle_exception(ExceptionFault::new(
//!     FaultError::not_found("User 42 does not exist").with_description("not found"),
//! ));
//! ```

#![doc(html_root_url = "https://docs.rs/backstop/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export component crates
pub use backstop_core as core;
pub use backstop_intercept as intercept;

// Flat re-exports of the types most hosts touch
pub use backstop_core::{
    empty_request, empty_response, ErrorBody, ErrorFields, ErrorModel, ExceptionFault, Fault,
    FaultContext, FaultError, Request, Response, RuntimeFault, Severity, SourceLocation,
    CLIENT_SAFE_MESSAGE,
};
pub use backstop_intercept::{
    compose_error_response, init_logging, ErrorQueue, ErrorStage, ExchangeTracker,
    FaultInterceptor, FaultInterceptorBuilder, InMemoryExchange, JsonRenderStage, LogConfig,
    LogInitError, LogSink, PipelineEngine, TracingLog,
};
