//! Output formatting for CLI commands

use serde::Serialize;

/// Format output as pretty JSON, or a single line when `compact` is set
pub fn format_output<T: Serialize>(data: &T, compact: bool) -> String {
    let formatted = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    formatted.unwrap_or_else(|_| "{}".to_string())
}
