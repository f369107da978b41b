//! Domain errors and the canonical error model.
//!
//! [`FaultError`] is the domain error type: a fault that knows how to
//! present itself to clients through the status/description/link triple.
//! Anything else that escapes the pipeline is wrapped into a generic
//! internal error whose client-visible message is the fixed
//! [`CLIENT_SAFE_MESSAGE`] - raw internal messages exist only in the log.
//!
//! [`ErrorModel`] is the canonical, immutable representation every fault is
//! normalized into, and [`ErrorBody`] is its client-facing wire shape.

use crate::fault::{ExceptionFault, Fault};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed phrase placed in client bodies for non-domain faults.
///
/// Raw internal messages never reach the client; they are recorded in the
/// log only.
pub const CLIENT_SAFE_MESSAGE: &str = "An unexpected error occurred.";

/// A domain error carrying its own client-facing presentation.
///
/// # Example
///
/// ```
/// use backstop_core::FaultError;
/// use http::StatusCode;
///
/// let error = FaultError::not_found("User 42 does not exist")
///     .with_code(1042)
///     .with_description("not found");
///
/// assert_eq!(error.status(), StatusCode::NOT_FOUND);
/// assert_eq!(error.code(), Some(1042));
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FaultError {
    status: StatusCode,
    code: Option<u32>,
    message: String,
    description: Option<String>,
    link: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

impl FaultError {
    /// Creates a domain error with the given status and message.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
            description: None,
            link: None,
            source: None,
        }
    }

    /// Creates an internal server error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Creates a bad-request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a method-not-allowed error.
    #[must_use]
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, message)
    }

    /// Creates a too-many-requests error.
    #[must_use]
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }

    /// Sets the numeric application code.
    #[must_use]
    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }

    /// Sets the client-facing description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the reference link for this error.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Attaches the underlying cause. Never exposed to clients.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the numeric application code, if set.
    #[must_use]
    pub fn code(&self) -> Option<u32> {
        self.code
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the client-facing description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the reference link, if set.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

/// The canonical normalized representation of a fault.
///
/// Built fresh per fault and immutable once built. Empty strings and zero
/// codes count as absent so the rendered body omits them rather than
/// carrying null-valued keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorModel {
    status: StatusCode,
    code: Option<u32>,
    message: Option<String>,
    description: Option<String>,
    link: Option<String>,
}

impl ErrorModel {
    /// The generic internal-error model used for every non-domain fault.
    #[must_use]
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: None,
            message: Some(CLIENT_SAFE_MESSAGE.to_string()),
            description: None,
            link: None,
        }
    }

    /// Normalizes any fault into exactly one error model.
    ///
    /// Runtime faults always take the generic internal-error shape; their
    /// descriptive message is rendered separately for the log. Exception
    /// faults that carry a [`FaultError`] pass through with their own
    /// presentation, everything else is wrapped. This function is total.
    #[must_use]
    pub fn from_fault(fault: &Fault) -> Self {
        match fault {
            Fault::Runtime(_) => Self::internal(),
            Fault::Exception(exception) => Self::from_exception(exception),
        }
    }

    /// Normalizes an escaped error.
    #[must_use]
    pub fn from_exception(fault: &ExceptionFault) -> Self {
        fault
            .error()
            .downcast_ref::<FaultError>()
            .map_or_else(Self::internal, Self::from)
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the numeric application code, if present.
    #[must_use]
    pub fn code(&self) -> Option<u32> {
        self.code
    }

    /// Returns the client-facing message, if present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the description, if present.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the reference link, if present.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Converts this model into the client-facing wire shape.
    ///
    /// Composition is a pure function of the model: the same model always
    /// yields the same body.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            errors: ErrorFields {
                message: self.message.clone(),
                code: self.code,
                description: self.description.clone(),
                link: self.link.clone(),
            },
        }
    }
}

impl From<&FaultError> for ErrorModel {
    fn from(error: &FaultError) -> Self {
        Self {
            status: error.status(),
            code: error.code().filter(|code| *code != 0),
            message: non_empty(error.message()),
            description: error.description().and_then(non_empty),
            link: error.link().and_then(non_empty),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// The client-facing wire shape.
///
/// The top-level `errors` key is always present, even when no fields are
/// populated, so response consumers can rely on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error fields visible to the client.
    pub errors: ErrorFields,
}

/// Optional error fields; absent fields are omitted, never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFields {
    /// Client-facing message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Numeric application code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    /// Client-facing description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference link for the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::{RuntimeFault, SourceLocation};
    use crate::severity::Severity;

    #[test]
    fn test_fault_error_presets() {
        assert_eq!(
            FaultError::internal("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(FaultError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(FaultError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            FaultError::method_not_allowed("x").status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            FaultError::too_many_requests("x").status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_fault_error_display_is_message() {
        let error = FaultError::not_found("User 42 does not exist");
        assert_eq!(error.to_string(), "User 42 does not exist");
    }

    #[test]
    fn test_fault_error_source_chain() {
        let io = std::io::Error::other("disk on fire");
        let error = FaultError::internal("storage failed").with_source(io);

        let source = std::error::Error::source(&error).expect("source should be set");
        assert!(source.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_model_copies_domain_fields() {
        let error = FaultError::not_found("User 42 does not exist")
            .with_code(1042)
            .with_description("not found")
            .with_link("https://errors.example.com/1042");

        let model = ErrorModel::from(&error);
        assert_eq!(model.status(), StatusCode::NOT_FOUND);
        assert_eq!(model.code(), Some(1042));
        assert_eq!(model.message(), Some("User 42 does not exist"));
        assert_eq!(model.description(), Some("not found"));
        assert_eq!(model.link(), Some("https://errors.example.com/1042"));
    }

    #[test]
    fn test_model_drops_empty_fields() {
        let error = FaultError::new(StatusCode::BAD_REQUEST, "").with_code(0);
        let model = ErrorModel::from(&error);

        assert_eq!(model.status(), StatusCode::BAD_REQUEST);
        assert_eq!(model.message(), None);
        assert_eq!(model.code(), None);
        assert_eq!(model.to_body(), ErrorBody::default());
    }

    #[test]
    fn test_runtime_fault_normalizes_to_generic_internal() {
        let fault = Fault::Runtime(RuntimeFault::new(
            Severity::USER_WARNING,
            "raw internal detail",
            SourceLocation::new("src/lib.rs", 1),
        ));

        let model = ErrorModel::from_fault(&fault);
        assert_eq!(model.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(model.message(), Some(CLIENT_SAFE_MESSAGE));
        assert_eq!(model.code(), None);
        assert_eq!(model.description(), None);
        assert_eq!(model.link(), None);
    }

    #[test]
    fn test_unclassified_exception_never_leaks_raw_message() {
        let fault = Fault::Exception(ExceptionFault::new(anyhow::anyhow!("division by zero")));

        let model = ErrorModel::from_fault(&fault);
        assert_eq!(model.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(model.message(), Some(CLIENT_SAFE_MESSAGE));
    }

    #[test]
    fn test_domain_exception_passes_through() {
        let fault = Fault::Exception(ExceptionFault::new(
            FaultError::not_found("gone").with_description("not found"),
        ));

        let model = ErrorModel::from_fault(&fault);
        assert_eq!(model.status(), StatusCode::NOT_FOUND);
        assert_eq!(model.message(), Some("gone"));
        assert_eq!(model.description(), Some("not found"));
    }

    #[test]
    fn test_body_serialization_omits_absent_fields() {
        let error = FaultError::not_found("gone").with_description("not found");
        let body = ErrorModel::from(&error).to_body();

        let json = serde_json::to_value(&body).expect("serialization should work");
        assert_eq!(
            json,
            serde_json::json!({"errors": {"message": "gone", "description": "not found"}})
        );
    }

    #[test]
    fn test_empty_body_keeps_errors_key() {
        let json = serde_json::to_string(&ErrorBody::default()).expect("serialization");
        assert_eq!(json, r#"{"errors":{}}"#);
    }
}
