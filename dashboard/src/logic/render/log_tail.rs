//! Log Tail Renderer
//!
//! A pure projection of the service's latest `logs` array, capped at the
//! most recent `MAX_LOG_ENTRIES` lines. Local banner rows are appended
//! directly and disappear at the next replace.

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

use crate::constants::{LOGS_PLACEHOLDER, MAX_LOG_ENTRIES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogRowKind {
    /// Line published by the service
    Remote,
    /// Timestamped line added by the dashboard itself
    Local,
    /// Italic "No logs available." row
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRow {
    pub text: String,
    pub kind: LogRowKind,
}

/// Log tail view region
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogTailView {
    rows: Vec<LogRow>,
    /// Keep the newest row in view
    follow_tail: bool,
    renders: u64,
}

impl LogTailView {
    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    #[cfg(test)]
    pub fn texts(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn follows_tail(&self) -> bool {
        self.follow_tail
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }
}

/// Text of one log entry: strings verbatim, anything else as compact JSON
pub fn log_line(entry: &Value) -> String {
    match entry {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Replace the region with the last `MAX_LOG_ENTRIES` entries
pub fn render_logs(view: &mut LogTailView, logs: &[Value]) {
    let start = logs.len().saturating_sub(MAX_LOG_ENTRIES);
    let recent = &logs[start..];

    if recent.is_empty() {
        view.rows = vec![LogRow {
            text: LOGS_PLACEHOLDER.to_string(),
            kind: LogRowKind::Placeholder,
        }];
        view.follow_tail = false;
    } else {
        view.rows = recent
            .iter()
            .map(|entry| LogRow {
                text: log_line(entry),
                kind: LogRowKind::Remote,
            })
            .collect();
        view.follow_tail = true;
    }

    view.renders += 1;
    log::debug!("Rendered {} log rows", recent.len());
}

/// Append a dashboard-side line, stamped `[HH:MM:SS]`
pub fn append_local(view: &mut LogTailView, message: &str, at: DateTime<Local>) {
    view.rows.push(LogRow {
        text: format!("[{}] {}", at.format("%H:%M:%S"), message),
        kind: LogRowKind::Local,
    });
    view.follow_tail = true;
    view.renders += 1;
}
