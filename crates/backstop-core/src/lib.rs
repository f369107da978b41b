//! # Backstop Core
//!
//! Core types for the Backstop fault-interception layer.
//!
//! This crate provides the leaf types the interceptor orchestrates:
//!
//! - [`Severity`] - Raw severity code with label table and fatal-set membership
//! - [`RuntimeFault`] / [`ExceptionFault`] / [`Fault`] - Raw fault captures
//! - [`FaultError`] - Domain error carrying the status/description/link triple
//! - [`ErrorModel`] - Canonical normalized error representation
//! - [`ErrorBody`] - Serializable client-facing wire shape

#![doc(html_root_url = "https://docs.rs/backstop-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod fault;
mod severity;
mod types;

pub use error::{ErrorBody, ErrorFields, ErrorModel, FaultError, CLIENT_SAFE_MESSAGE};
pub use fault::{ExceptionFault, Fault, FaultContext, RuntimeFault, SourceLocation};
pub use severity::Severity;
pub use types::{empty_request, empty_response, Request, Response};
