//! Output rendering for dispatch results.
//!
//! Text mode prints the target on the first line and one `key: value` line
//! per parameter that was set. JSON mode prints the value as returned.

use crate::core::config::OutputFormat;
use crate::core::error::QuantError;
use serde_json::Value as JsonValue;

const MAX_VALUE_CHARS: usize = 120;

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

fn scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) if items.is_empty() => "(none)".to_string(),
        JsonValue::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// Plain-text rendering of an envelope. Values that are not envelopes are
/// pretty-printed as JSON.
pub fn render_text(value: &JsonValue, color: bool) -> String {
    use colored::Colorize;

    let (Some(cmd), Some(params)) = (
        value.get("cmd").and_then(|c| c.as_str()),
        value.get("params").and_then(|p| p.as_object()),
    ) else {
        return serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    };

    let mut lines = Vec::with_capacity(params.len() + 1);
    lines.push(if color {
        cmd.bright_cyan().bold().to_string()
    } else {
        cmd.to_string()
    });
    for (key, val) in params {
        if val.is_null() {
            continue;
        }
        let shown = compact_line(&scalar_text(val), MAX_VALUE_CHARS);
        if color {
            lines.push(format!("  {}: {}", key.as_str().bright_black(), shown));
        } else {
            lines.push(format!("  {}: {}", key, shown));
        }
    }
    lines.join("\n")
}

pub fn render(value: &JsonValue, format: OutputFormat, color: bool) -> Result<String, QuantError> {
    match format {
        OutputFormat::Text => Ok(render_text(value, color)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
    }
}
