//! The fault interceptor.
//!
//! One orchestrator handles all three fault classes through the same
//! protocol: normalize the fault into a canonical error model, log it
//! exactly once, recover a request/response pair, compose the client
//! response, and restart the pipeline with the error-only queue. Both the
//! runtime-error path and the exception path call the same internal
//! handler; neither re-raises into the other.
//!
//! The interceptor does not register any process-wide hooks itself. The
//! host wires [`handle_runtime_error`](FaultInterceptor::handle_runtime_error),
//! [`handle_exception`](FaultInterceptor::handle_exception) and
//! [`handle_shutdown`](FaultInterceptor::handle_shutdown) into its own hook
//! mechanism once at bootstrap, which keeps registration explicit, owned,
//! and single.

use crate::compose::compose_error_response;
use crate::engine::PipelineEngine;
use crate::log::{LogSink, TracingLog};
use crate::tracker::{ExchangeTracker, InMemoryExchange};
use backstop_core::{ErrorModel, ExceptionFault, Fault, FaultContext, RuntimeFault};
use std::sync::Arc;

/// Orchestrates fault capture and recovery.
///
/// Constructed once per process lifetime with its collaborators injected;
/// see the [crate-level documentation](crate) for a wiring example.
pub struct FaultInterceptor {
    log: Arc<dyn LogSink>,
    pipeline: Arc<dyn PipelineEngine>,
    exchange: Arc<dyn ExchangeTracker>,
    expose_raw_errors: bool,
}

impl FaultInterceptor {
    /// Creates a builder around the pipeline engine.
    ///
    /// The engine is the one collaborator without a default; the log sink
    /// defaults to [`TracingLog`] and the tracker to [`InMemoryExchange`].
    #[must_use]
    pub fn builder(pipeline: Arc<dyn PipelineEngine>) -> FaultInterceptorBuilder {
        FaultInterceptorBuilder {
            log: None,
            pipeline,
            exchange: None,
            expose_raw_errors: false,
        }
    }

    /// Returns whether raw fault detail is echoed to the operator console.
    #[must_use]
    pub fn exposes_raw_errors(&self) -> bool {
        self.expose_raw_errors
    }

    /// Handles a runtime error raised by the runtime.
    ///
    /// The descriptive message is rendered and logged with the fault's
    /// contextual variables, then the fault escalates into a generic
    /// internal-error response. This holds for every severity - the
    /// pipeline fails closed rather than resuming after a warning-level
    /// notice.
    pub fn handle_runtime_error(&self, fault: RuntimeFault) {
        self.handle(Fault::Runtime(fault));
    }

    /// Handles an error that escaped all stage-level handling.
    ///
    /// Domain errors pass through with their own status and presentation;
    /// anything else is wrapped into a generic internal error whose client
    /// message is the fixed client-safe phrase.
    pub fn handle_exception(&self, fault: ExceptionFault) {
        self.handle(Fault::Exception(fault));
    }

    /// Handles the fault record observed at process end.
    ///
    /// The host passes the last runtime error explicitly; the interceptor
    /// never polls ambient process state. A missing record, or one whose
    /// severity is outside the fatal set, is a normal exit: no log entry,
    /// no restart.
    pub fn handle_shutdown(&self, last_error: Option<RuntimeFault>) {
        if let Some(fault) = last_error {
            if fault.severity.is_fatal() {
                self.handle(Fault::Runtime(fault));
            }
        }
    }

    /// The shared handling protocol, identical for every entry point.
    fn handle(&self, fault: Fault) {
        let model = ErrorModel::from_fault(&fault);
        self.log_fault(&fault);
        self.respond(model);
    }

    /// Emits exactly one log record for the fault.
    fn log_fault(&self, fault: &Fault) {
        let (message, context) = match fault {
            Fault::Runtime(f) => (f.render(), f.context.clone()),
            Fault::Exception(e) => {
                let mut context = FaultContext::new();
                if let Some(location) = e.location() {
                    context.insert("exception_file".to_string(), location.file.clone());
                    context.insert("exception_line".to_string(), location.line.to_string());
                }
                context.insert("exception_trace".to_string(), format!("{:#}", e.error()));
                (e.describe(), context)
            }
        };

        if self.expose_raw_errors {
            eprintln!("{message}");
        }
        self.log.error(&message, &context);
    }

    /// Composes the client response and restarts the pipeline.
    ///
    /// Runs strictly after logging, so a client-visible response is never
    /// produced for a fault that was not recorded. The error-only queue is
    /// installed before the restart, so a fault raised during the restart
    /// can only re-enter the reduced queue.
    fn respond(&self, model: ErrorModel) {
        let request = self.exchange.resolve_request();
        let response = self.exchange.resolve_response();
        let response = compose_error_response(&model, response);

        self.pipeline.prepare_error_queue();
        self.pipeline.invoke(request, response);
    }
}

/// Builder for [`FaultInterceptor`].
pub struct FaultInterceptorBuilder {
    log: Option<Arc<dyn LogSink>>,
    pipeline: Arc<dyn PipelineEngine>,
    exchange: Option<Arc<dyn ExchangeTracker>>,
    expose_raw_errors: bool,
}

impl FaultInterceptorBuilder {
    /// Sets the log sink.
    #[must_use]
    pub fn log(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = Some(log);
        self
    }

    /// Sets the exchange tracker.
    #[must_use]
    pub fn exchange(mut self, exchange: Arc<dyn ExchangeTracker>) -> Self {
        self.exchange = Some(exchange);
        self
    }

    /// Echoes raw fault detail to the operator console (stderr).
    ///
    /// Operator-visible only; the composed client body always carries the
    /// client-safe message for non-domain faults.
    #[must_use]
    pub fn expose_raw_errors(mut self, expose: bool) -> Self {
        self.expose_raw_errors = expose;
        self
    }

    /// Builds the interceptor.
    #[must_use]
    pub fn build(self) -> FaultInterceptor {
        FaultInterceptor {
            log: self.log.unwrap_or_else(|| Arc::new(TracingLog)),
            pipeline: self.pipeline,
            exchange: self.exchange.unwrap_or_else(|| Arc::new(InMemoryExchange::new())),
            expose_raw_errors: self.expose_raw_errors,
        }
    }
}
