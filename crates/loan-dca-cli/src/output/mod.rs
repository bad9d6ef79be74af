pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a leaf JSON value as a plain cell string.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// The row array of a value: `results` for batch output, the value itself
/// when it is already an array.
pub(crate) fn rows_of(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(arr) => Some(arr),
        Value::Object(map) => map.get("results").and_then(Value::as_array),
        _ => None,
    }
}

/// The flat field map to display: the envelope's `result` when present,
/// otherwise the object itself.
pub(crate) fn fields_of(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(inner)) => Some(inner),
            _ => Some(map),
        },
        _ => None,
    }
}
