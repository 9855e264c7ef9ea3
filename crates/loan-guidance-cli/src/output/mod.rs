pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of a computation envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Split a result into its scalar fields and its row collection, if any.
/// Schedules carry rows under `entries`; analyses under `schedule_summary`.
pub(crate) fn split_rows(result: &Map<String, Value>) -> (Map<String, Value>, Option<&Vec<Value>>) {
    let mut scalars = Map::new();
    let mut rows = None;
    for (key, val) in result {
        match (key.as_str(), val) {
            ("entries" | "schedule_summary", Value::Array(arr)) => rows = Some(arr),
            _ => {
                scalars.insert(key.clone(), val.clone());
            }
        }
    }
    (scalars, rows)
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join("; "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
