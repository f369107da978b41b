//! Raw fault captures.
//!
//! A [`Fault`] is a heterogeneous record of something that went wrong before
//! normalization: a [`RuntimeFault`] raised by the runtime with a severity
//! code and source location, or an [`ExceptionFault`] that escaped all
//! stage-level handling. A fatal termination record is a plain
//! `Option<RuntimeFault>` handed to the shutdown entry point by the host;
//! there is no ambient last-error state.

use crate::severity::Severity;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

/// Contextual variables attached to a fault, forwarded to the log sink.
pub type FaultContext = BTreeMap<String, String>;

/// A source-code location attached to a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file path.
    pub file: String,
    /// Line number within the file.
    pub line: u32,
}

impl SourceLocation {
    /// Creates a new source location.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file {} at line {}", self.file, self.line)
    }
}

/// A recoverable runtime error raised synchronously by the runtime.
///
/// Every runtime fault escalates into a full error response; the pipeline
/// never resumes the stage that raised it, even for warning-level notices.
#[derive(Debug, Clone)]
pub struct RuntimeFault {
    /// Raw severity code.
    pub severity: Severity,
    /// The raw error message. Log-only; never placed in a client body.
    pub message: String,
    /// Where the fault was raised.
    pub location: SourceLocation,
    /// Contextual variables captured at the fault site.
    pub context: FaultContext,
}

impl RuntimeFault {
    /// Creates a runtime fault with an empty context.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            severity,
            message: message.into(),
            location,
            context: FaultContext::new(),
        }
    }

    /// Attaches contextual variables.
    #[must_use]
    pub fn with_context(mut self, context: FaultContext) -> Self {
        self.context = context;
        self
    }

    /// Renders the descriptive log message for this fault.
    ///
    /// The rendered line is handed to the log sink; the client body for a
    /// runtime fault always carries the fixed client-safe phrase instead.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "Error of level {}. Error message was \"{}\" in {}.",
            self.severity, self.message, self.location
        )
    }
}

/// An error that escaped all stage-level handling.
///
/// Carries the escaped error (and its causal chain) plus the source location
/// when the host knows it - panic hooks do, plain error values do not.
#[derive(Debug)]
pub struct ExceptionFault {
    error: anyhow::Error,
    location: Option<SourceLocation>,
}

impl ExceptionFault {
    /// Wraps an escaped error with no known source location.
    #[must_use]
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            location: None,
        }
    }

    /// Wraps an escaped error raised at a known location.
    #[must_use]
    pub fn at(error: impl Into<anyhow::Error>, location: SourceLocation) -> Self {
        Self {
            error: error.into(),
            location: Some(location),
        }
    }

    /// Builds an exception fault from a panic payload.
    ///
    /// Extracts `&str` and `String` payloads; anything else falls back to
    /// the opaque `Box<dyn Any>` description, matching how the standard
    /// library prints unknown payloads.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send), location: Option<SourceLocation>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "Box<dyn Any>".to_string());

        Self {
            error: anyhow::anyhow!(message),
            location,
        }
    }

    /// Returns the escaped error.
    #[must_use]
    pub fn error(&self) -> &anyhow::Error {
        &self.error
    }

    /// Returns the source location, when known.
    #[must_use]
    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Renders the descriptive log message for this fault.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.location {
            Some(location) => format!(
                "Uncaught exception thrown in {} with message \"{}\".",
                location, self.error
            ),
            None => format!("Uncaught exception with message \"{}\".", self.error),
        }
    }
}

/// A raw fault awaiting normalization.
#[derive(Debug)]
pub enum Fault {
    /// A runtime error raised with a severity code.
    Runtime(RuntimeFault),
    /// An error that escaped all stage-level handling.
    Exception(ExceptionFault),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_fault_render() {
        let fault = RuntimeFault::new(
            Severity::USER_WARNING,
            "index out of range",
            SourceLocation::new("src/handler.rs", 42),
        );

        assert_eq!(
            fault.render(),
            "Error of level user warning. Error message was \"index out of range\" \
             in file src/handler.rs at line 42."
        );
    }

    #[test]
    fn test_runtime_fault_render_unknown_severity() {
        let fault = RuntimeFault::new(
            Severity(37),
            "boom",
            SourceLocation::new("src/lib.rs", 7),
        );

        let rendered = fault.render();
        assert!(rendered.contains("Unknown error level, code of 37 passed"));
        assert!(rendered.contains("in file src/lib.rs at line 7."));
    }

    #[test]
    fn test_runtime_fault_context() {
        let mut context = FaultContext::new();
        context.insert("request_path".to_string(), "/users".to_string());

        let fault = RuntimeFault::new(
            Severity::NOTICE,
            "deprecated parameter",
            SourceLocation::new("src/routes.rs", 10),
        )
        .with_context(context);

        assert_eq!(fault.context["request_path"], "/users");
    }

    #[test]
    fn test_exception_describe_with_location() {
        let fault = ExceptionFault::at(
            anyhow::anyhow!("division by zero"),
            SourceLocation::new("src/math.rs", 3),
        );

        assert_eq!(
            fault.describe(),
            "Uncaught exception thrown in file src/math.rs at line 3 \
             with message \"division by zero\"."
        );
    }

    #[test]
    fn test_exception_describe_without_location() {
        let fault = ExceptionFault::new(anyhow::anyhow!("division by zero"));
        assert_eq!(
            fault.describe(),
            "Uncaught exception with message \"division by zero\"."
        );
    }

    #[test]
    fn test_from_panic_str_payload() {
        let payload: Box<dyn Any + Send> = Box::new("stage panicked");
        let fault = ExceptionFault::from_panic(payload.as_ref(), None);
        assert_eq!(fault.error().to_string(), "stage panicked");
    }

    #[test]
    fn test_from_panic_string_payload() {
        let payload: Box<dyn Any + Send> = Box::new("stage panicked".to_string());
        let fault = ExceptionFault::from_panic(payload.as_ref(), None);
        assert_eq!(fault.error().to_string(), "stage panicked");
    }

    #[test]
    fn test_from_panic_opaque_payload() {
        let payload: Box<dyn Any + Send> = Box::new(42_u64);
        let fault = ExceptionFault::from_panic(
            payload.as_ref(),
            Some(SourceLocation::new("src/main.rs", 1)),
        );
        assert_eq!(fault.error().to_string(), "Box<dyn Any>");
        assert!(fault.location().is_some());
    }
}
