//! Error response composition.
//!
//! Builds a well-formed error response from a canonical [`ErrorModel`]: the
//! stale body is discarded, the status is set from the model, and the typed
//! [`ErrorBody`] is attached to the response extensions for whatever
//! content-negotiation stage runs in the error-only queue. The composer
//! never serializes to bytes itself.

use backstop_core::{ErrorBody, ErrorModel, Response};
use bytes::Bytes;
use http_body_util::Full;

/// Composes an error response from a model onto an existing response.
///
/// Headers and extensions of the original response survive, but the body
/// stream is reset and any stale `Content-Length` is dropped so partial
/// output from the failed stage cannot leak.
///
/// Composition is a pure function of the model: composing twice from the
/// same model yields identical responses.
#[must_use]
pub fn compose_error_response(model: &ErrorModel, response: Response) -> Response {
    let (mut parts, _) = response.into_parts();
    parts.status = model.status();
    parts.headers.remove(http::header::CONTENT_LENGTH);
    parts.extensions.insert(model.to_body());

    Response::from_parts(parts, Full::new(Bytes::new()))
}
