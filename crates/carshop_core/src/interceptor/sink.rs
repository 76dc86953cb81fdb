//! Structured audit record sink.

use log::Level;
use std::fmt::Write as _;

/// Message of the pre-call audit record.
pub const AUDIT_EVENT: &str = "service_audit";
/// Message of the elapsed-time record.
pub const TIMING_EVENT: &str = "service_timing";
/// Message of the failure record.
pub const FAILURE_EVENT: &str = "service_error";

/// One structured record emitted by the interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub level: Level,
    pub message: &'static str,
    pub fields: Vec<(&'static str, String)>,
}

impl AuditRecord {
    /// Returns the value of the first field named `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Append-only destination for audit records.
///
/// Implementations must not block the caller for long and must not fail;
/// delivery is best-effort.
pub trait AuditSink: Send + Sync {
    fn emit(&self, record: &AuditRecord);
}

/// Forwards audit records to the `log` facade as
/// `event=<message> module=service key=value ...` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AuditSink for LogSink {
    fn emit(&self, record: &AuditRecord) {
        log::log!(record.level, "{}", render_line(record));
    }
}

fn render_line(record: &AuditRecord) -> String {
    let mut line = format!("event={} module=service", record.message);
    for (key, value) in &record.fields {
        let _ = write!(line, " {key}={value}");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{render_line, AuditRecord, AUDIT_EVENT};
    use log::Level;

    #[test]
    fn render_line_keeps_field_order() {
        let record = AuditRecord {
            level: Level::Info,
            message: AUDIT_EVENT,
            fields: vec![
                ("operation", "CarService::get_by_id".to_string()),
                ("args", "[2]".to_string()),
            ],
        };
        assert_eq!(
            render_line(&record),
            "event=service_audit module=service operation=CarService::get_by_id args=[2]"
        );
        assert_eq!(record.field("args"), Some("[2]"));
        assert_eq!(record.field("missing"), None);
    }
}
