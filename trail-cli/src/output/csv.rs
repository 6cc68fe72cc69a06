//! CSV output formatting for data export.

use super::{Column, OutputConfig};
use serde::Serialize;

/// CSV output formatter
pub struct CsvOutput;

impl CsvOutput {
    /// Format a single object as a two-row CSV (header + values).
    pub fn format<T: Serialize>(data: &T, _config: &OutputConfig) -> String {
        match serde_json::to_value(data) {
            Ok(serde_json::Value::Object(obj)) => {
                let headers: Vec<&str> = obj.keys().map(|s| s.as_str()).collect();
                let values: Vec<String> = obj.values().map(Self::value_to_csv).collect();
                format!("{}\n{}", headers.join(","), values.join(","))
            }
            Ok(other) => Self::value_to_csv(&other),
            Err(_) => String::new(),
        }
    }

    /// Format an array of items as CSV with specified columns
    pub fn format_with_columns<T: Serialize>(
        data: &[T],
        columns: &[Column],
        _config: &OutputConfig,
    ) -> String {
        let headers: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        let mut output = headers.join(",");
        output.push('\n');

        for item in data {
            if let Ok(json) = serde_json::to_value(item) {
                let row: Vec<String> = columns
                    .iter()
                    .map(|col| {
                        json.get(&col.key)
                            .map(Self::value_to_csv)
                            .unwrap_or_default()
                    })
                    .collect();
                output.push_str(&row.join(","));
                output.push('\n');
            }
        }

        output.trim_end().to_string()
    }

    fn value_to_csv(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => Self::escape_value(s),
            serde_json::Value::Array(arr) => Self::escape_value(&format!("[{} items]", arr.len())),
            serde_json::Value::Object(obj) => {
                Self::escape_value(&format!("{{{} fields}}", obj.len()))
            }
        }
    }

    /// Quote values containing a comma, newline or quote; double inner quotes.
    fn escape_value(s: &str) -> String {
        if s.contains(',') || s.contains('\n') || s.contains('\r') || s.contains('"') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
