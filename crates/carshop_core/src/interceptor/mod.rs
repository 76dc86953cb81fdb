//! Transparent call interception for service operations.
//!
//! # Responsibility
//! - Wrap a call with three observational behaviors: pre-call audit,
//!   wall-clock timing and failure capture.
//! - Provide `Observed<S>`, the decorator applied to every service at
//!   construction time.
//!
//! # Invariants
//! - Audit emission precedes the call; the call precedes timing emission;
//!   the failure record (if any) is emitted before the error is returned.
//! - The call runs exactly once. Its arguments, return value and error are
//!   never altered, replaced or retried.
//! - Arguments are logged unredacted, including entity payloads such as
//!   `User::password`.

mod record;
mod sink;

pub use record::{InvocationOutcome, InvocationRecord};
pub use sink::{AuditRecord, AuditSink, LogSink, AUDIT_EVENT, FAILURE_EVENT, TIMING_EVENT};

use std::error::Error;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Cross-cutting observer shared by all observed services.
#[derive(Clone)]
pub struct Interceptor {
    sink: Arc<dyn AuditSink>,
}

impl Interceptor {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Interceptor writing to the `log` facade.
    pub fn logging() -> Self {
        Self::new(Arc::new(LogSink))
    }

    /// Runs `call` once, surrounded by audit, timing and failure records.
    ///
    /// Returns exactly what `call` returned.
    pub fn observe<T, E, F>(
        &self,
        operation: &'static str,
        arguments: &[&dyn Debug],
        call: F,
    ) -> Result<T, E>
    where
        E: Error,
        F: FnOnce() -> Result<T, E>,
    {
        let mut record = InvocationRecord::begin(operation, arguments);
        self.sink.emit(&record.audit_record());

        let result = call();

        record.complete(&result);
        self.sink.emit(&record.timing_record());
        if let Some(failure) = record.failure_record() {
            self.sink.emit(&failure);
        }

        result
    }
}

impl Default for Interceptor {
    fn default() -> Self {
        Self::logging()
    }
}

impl Debug for Interceptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptor").finish_non_exhaustive()
    }
}

/// Service decorator routing every operation through an `Interceptor`.
#[derive(Debug)]
pub struct Observed<S> {
    inner: S,
    interceptor: Interceptor,
}

impl<S> Observed<S> {
    pub fn new(inner: S, interceptor: Interceptor) -> Self {
        Self { inner, interceptor }
    }

    /// Invokes `call` on the wrapped service under observation.
    pub fn call<T, E, F>(
        &self,
        operation: &'static str,
        arguments: &[&dyn Debug],
        call: F,
    ) -> Result<T, E>
    where
        E: Error,
        F: FnOnce(&S) -> Result<T, E>,
    {
        self.interceptor
            .observe(operation, arguments, || call(&self.inner))
    }
}
