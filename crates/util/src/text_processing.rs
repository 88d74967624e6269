//! # Text Processing Utilities
//!
//! Rendering of command output and compact status summaries.

use serde_json::Value;

const SUMMARY_MAX_LEN: usize = 160;

/// Render a command output for display.
///
/// Strings are shown verbatim; any other JSON value is pretty-printed with
/// two-space indentation.
pub fn render_output(output: &Value) -> String {
    match output {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Build a one-line status summary such as `run • success` or
/// `upload • failed: File not found`.
pub fn summarize_outcome(operation: &str, error: Option<&str>) -> String {
    match error {
        None => format!("{} • success", operation),
        Some(message) => format!("{} • failed: {}", operation, truncate_for_summary(message, SUMMARY_MAX_LEN)),
    }
}

pub fn truncate_for_summary(text: &str, max_len: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_len {
        return trimmed.to_string();
    }

    // Reserve space for the trailing ellipsis ("...").
    let target_len = max_len.saturating_sub(3);
    let truncated: String = trimmed.chars().take(target_len).collect();
    format!("{}...", truncated.trim_end())
}
