//! Pipeline restart protocol and the error-only queue.
//!
//! The interceptor consumes the external pipeline engine through the
//! [`PipelineEngine`] contract: `prepare_error_queue` swaps the active stage
//! queue for the reduced error-only queue, then `invoke` runs it - in that
//! order, exactly once per fault. The error-only queue contains only stages
//! that render an already-composed error response; it never routes back into
//! the interceptor, which bounds recursion to the queue length.
//!
//! [`ErrorQueue`] and [`JsonRenderStage`] are a ready-made error-only queue
//! for hosts that do not bring their own rendering stages.

use backstop_core::{ErrorBody, Request, Response};
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http_body_util::Full;
use std::sync::Arc;

/// The restart protocol contract with the external pipeline engine.
///
/// The interceptor calls `prepare_error_queue` then `invoke`, in strict
/// sequence, and never loops. Response delivery is the engine's
/// responsibility; the interceptor discards the returned response.
pub trait PipelineEngine: Send + Sync {
    /// Replaces the active stage queue with the error-only queue.
    fn prepare_error_queue(&self);

    /// Runs the scheduled queue with the given request and response.
    fn invoke(&self, request: Request, response: Response) -> Response;
}

/// One stage of the error-only queue.
///
/// Error stages render or serialize an already-composed error response;
/// business-logic stages never belong here.
pub trait ErrorStage: Send + Sync {
    /// Returns the unique name of this stage, used for logging and tests.
    fn name(&self) -> &'static str;

    /// Processes the response, returning the (possibly rewritten) response.
    fn process(&self, request: &Request, response: Response) -> Response;
}

/// An ordered list of error-rendering stages.
#[derive(Default)]
pub struct ErrorQueue {
    stages: Vec<Arc<dyn ErrorStage>>,
}

impl ErrorQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage to the queue.
    #[must_use]
    pub fn with_stage<S: ErrorStage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Runs every stage in order against the response.
    #[must_use]
    pub fn run(&self, request: &Request, mut response: Response) -> Response {
        for stage in &self.stages {
            response = stage.process(request, response);
        }
        response
    }

    /// Returns the names of all stages in order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if the queue has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Serializes the attached [`ErrorBody`] into a JSON body.
///
/// A response with no attached body - or one that fails to serialize -
/// still yields the bare `{"errors":{}}` payload, so the client never sees
/// an empty or malformed body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderStage;

impl ErrorStage for JsonRenderStage {
    fn name(&self) -> &'static str {
        "json_render"
    }

    fn process(&self, _request: &Request, response: Response) -> Response {
        let (mut parts, _) = response.into_parts();
        let body = parts.extensions.remove::<ErrorBody>().unwrap_or_default();
        let bytes = serde_json::to_vec(&body).unwrap_or_else(|_| br#"{"errors":{}}"#.to_vec());

        parts
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Response::from_parts(parts, Full::new(Bytes::from(bytes)))
    }
}
