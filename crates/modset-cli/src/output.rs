//! Formatted output helpers for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

/// Output format selectable on commands that print results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sections.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Renders a titled list, one indented item per line.
///
/// Empty lists render as `(none)` so that every title is followed by
/// something.
#[must_use]
pub fn render_list<S: AsRef<str>>(title: &str, items: &[S]) -> String {
    let mut out = format!("{title} ({}):\n", items.len());
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        out.push_str("  ");
        out.push_str(item.as_ref());
        out.push('\n');
    }
    out
}

/// Serializes `value` as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
