//! Per-call invocation record.
//!
//! # Invariants
//! - A record belongs to exactly one call and is dropped when it returns.
//! - `elapsed` is wall-clock time measured from `begin`, so it includes the
//!   cost of emitting the pre-call audit record.

use super::sink::{AuditRecord, AUDIT_EVENT, FAILURE_EVENT, TIMING_EVENT};
use chrono::{DateTime, SecondsFormat, Utc};
use log::Level;
use std::error::Error;
use std::fmt::Debug;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How a wrapped call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    Success,
    Failure { message: String, detail: String },
}

/// Observation state for a single wrapped call.
#[derive(Debug, Clone)]
pub struct InvocationRecord {
    pub invocation_id: Uuid,
    pub operation: &'static str,
    /// `Debug` renderings of the call arguments, unredacted and in order.
    pub arguments: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub elapsed: Option<Duration>,
    pub outcome: Option<InvocationOutcome>,
    clock: Instant,
}

impl InvocationRecord {
    /// Opens a record and starts its clock.
    pub fn begin(operation: &'static str, arguments: &[&dyn Debug]) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            operation,
            arguments: arguments.iter().map(|arg| format!("{arg:?}")).collect(),
            started_at: Utc::now(),
            elapsed: None,
            outcome: None,
            clock: Instant::now(),
        }
    }

    /// Stops the clock and stores the outcome of `result`.
    pub fn complete<T, E: Error>(&mut self, result: &Result<T, E>) {
        self.elapsed = Some(self.clock.elapsed());
        self.outcome = Some(match result {
            Ok(_) => InvocationOutcome::Success,
            Err(err) => InvocationOutcome::Failure {
                message: err.to_string(),
                detail: error_detail(err),
            },
        });
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Some(InvocationOutcome::Failure { .. }))
    }

    /// Pre-call audit record: start time, operation and arguments.
    pub fn audit_record(&self) -> AuditRecord {
        AuditRecord {
            level: Level::Info,
            message: AUDIT_EVENT,
            fields: vec![
                ("invocation_id", self.invocation_id.to_string()),
                (
                    "started_at",
                    self.started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                ),
                ("operation", self.operation.to_string()),
                ("args", self.rendered_arguments()),
            ],
        }
    }

    /// Elapsed-time record. Emitted for successful and failed calls alike.
    pub fn timing_record(&self) -> AuditRecord {
        let duration = self.elapsed.unwrap_or_default();
        let status = if self.is_failure() { "error" } else { "ok" };
        AuditRecord {
            level: Level::Info,
            message: TIMING_EVENT,
            fields: vec![
                ("invocation_id", self.invocation_id.to_string()),
                ("operation", self.operation.to_string()),
                ("status", status.to_string()),
                ("duration_ms", duration.as_millis().to_string()),
                ("duration_us", duration.as_micros().to_string()),
            ],
        }
    }

    /// Failure record, present only when the call failed.
    pub fn failure_record(&self) -> Option<AuditRecord> {
        let Some(InvocationOutcome::Failure { message, detail }) = &self.outcome else {
            return None;
        };
        Some(AuditRecord {
            level: Level::Error,
            message: FAILURE_EVENT,
            fields: vec![
                ("invocation_id", self.invocation_id.to_string()),
                ("operation", self.operation.to_string()),
                ("args", self.rendered_arguments()),
                ("error", message.clone()),
                ("detail", detail.clone()),
            ],
        })
    }

    fn rendered_arguments(&self) -> String {
        format!("[{}]", self.arguments.join(", "))
    }
}

/// `Debug` form of `err` followed by its `source()` chain.
fn error_detail(err: &dyn Error) -> String {
    let mut detail = format!("{err:?}");
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(" | caused by: ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}
