//! Request/response recovery.
//!
//! When a fault fires, the interceptor needs a request and a response to
//! restart the pipeline with. The [`ExchangeTracker`] collaborator recovers
//! them through a three-tier fallback: the most recently observed in-flight
//! object, then the original incoming one, then an empty default.
//!
//! Accessors move their value out rather than cloning: the in-flight
//! exchange is dead once a fault fires, and `http::Request` is not `Clone`.

use backstop_core::{empty_request, empty_response, Request, Response};
use parking_lot::Mutex;

/// Recovers the request/response pair for an error restart.
pub trait ExchangeTracker: Send + Sync {
    /// Takes the most recently observed in-flight request, if any.
    fn take_latest_request(&self) -> Option<Request>;

    /// Takes the original incoming request, if any.
    fn take_original_request(&self) -> Option<Request>;

    /// Takes the most recently observed in-flight response, if any.
    fn take_latest_response(&self) -> Option<Response>;

    /// Takes the original response, if any.
    fn take_original_response(&self) -> Option<Response>;

    /// Resolves a request: latest, else original, else an empty default.
    fn resolve_request(&self) -> Request {
        self.take_latest_request()
            .or_else(|| self.take_original_request())
            .unwrap_or_else(empty_request)
    }

    /// Resolves a response: latest, else original, else an empty default.
    fn resolve_response(&self) -> Response {
        self.take_latest_response()
            .or_else(|| self.take_original_response())
            .unwrap_or_else(empty_response)
    }
}

/// Slot-based [`ExchangeTracker`] for hosts without their own tracking.
///
/// The host pipeline records the original pair when a request enters and
/// the latest pair as stages hand them onward.
#[derive(Debug, Default)]
pub struct InMemoryExchange {
    latest_request: Mutex<Option<Request>>,
    original_request: Mutex<Option<Request>>,
    latest_response: Mutex<Option<Response>>,
    original_response: Mutex<Option<Response>>,
}

impl InMemoryExchange {
    /// Creates an empty exchange tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the original incoming request.
    pub fn record_original_request(&self, request: Request) {
        *self.original_request.lock() = Some(request);
    }

    /// Records the most recently observed in-flight request.
    pub fn record_latest_request(&self, request: Request) {
        *self.latest_request.lock() = Some(request);
    }

    /// Records the original response.
    pub fn record_original_response(&self, response: Response) {
        *self.original_response.lock() = Some(response);
    }

    /// Records the most recently observed in-flight response.
    pub fn record_latest_response(&self, response: Response) {
        *self.latest_response.lock() = Some(response);
    }
}

impl ExchangeTracker for InMemoryExchange {
    fn take_latest_request(&self) -> Option<Request> {
        self.latest_request.lock().take()
    }

    fn take_original_request(&self) -> Option<Request> {
        self.original_request.lock().take()
    }

    fn take_latest_response(&self) -> Option<Response> {
        self.latest_response.lock().take()
    }

    fn take_original_response(&self) -> Option<Response> {
        self.original_response.lock().take()
    }
}
