//! # Backstop Intercept
//!
//! Fault interception and recovery for a middleware pipeline.
//!
//! The [`FaultInterceptor`] is the orchestrator: the host wires its three
//! entry points into whatever hook mechanism the platform offers (a panic
//! hook, an error callback, a shutdown path) and the interceptor guarantees
//! that every fault is logged exactly once, normalized into a canonical
//! error model, composed into a well-formed client response, and delivered
//! by restarting the pipeline with an error-only queue.
//!
//! ```text
//! raw fault → normalize → log → compose response → prepare error queue → invoke
//! ```
//!
//! Collaborators are injected as typed traits at construction time:
//!
//! - [`LogSink`] - where fault records go
//! - [`PipelineEngine`] - the restart protocol contract
//! - [`ExchangeTracker`] - recovers the in-flight request/response
//!
//! ## Example
//!
//! ```
//! use backstop_intercept::{ErrorQueue, FaultInterceptor, JsonRenderStage, PipelineEngine};
//! use backstop_core::{ExceptionFault, Request, Response};
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
//! interceptor.handle_exception(ExceptionFault::new(std::fmt::Error));
//! ```

#![doc(html_root_url = "https://docs.rs/backstop-intercept/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod compose;
pub mod engine;
pub mod interceptor;
pub mod log;
pub mod tracker;

pub use compose::compose_error_response;
pub use engine::{ErrorQueue, ErrorStage, JsonRenderStage, PipelineEngine};
pub use interceptor::{FaultInterceptor, FaultInterceptorBuilder};
pub use log::{init_logging, LogConfig, LogInitError, LogSink, TracingLog};
pub use tracker::{ExchangeTracker, InMemoryExchange};
