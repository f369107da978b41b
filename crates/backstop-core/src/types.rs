//! Common request/response types.
//!
//! Re-exports the HTTP request and response types used throughout the
//! interception layer.

use bytes::Bytes;
use http_body_util::Full;

/// The HTTP request type flowing through the pipeline.
///
/// A standard `http::Request` with a `Full<Bytes>` body.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type flowing through the pipeline.
///
/// A standard `http::Response` with a `Full<Bytes>` body.
pub type Response = http::Response<Full<Bytes>>;

/// Constructs an empty default request.
///
/// The last tier of the request fallback chain, used when neither an
/// in-flight nor an original request can be recovered.
#[must_use]
pub fn empty_request() -> Request {
    http::Request::new(Full::new(Bytes::new()))
}

/// Constructs an empty default response.
#[must_use]
pub fn empty_response() -> Response {
    http::Response::new(Full::new(Bytes::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode};

    #[test]
    fn test_empty_request_defaults() {
        let request = empty_request();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri(), "/");
    }

    #[test]
    fn test_empty_response_defaults() {
        let response = empty_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().is_empty());
    }
}
