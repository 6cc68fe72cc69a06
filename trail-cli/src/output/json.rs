//! JSON output formatting for machine-readable output.

use super::OutputConfig;
use serde::Serialize;

/// JSON output formatter
pub struct JsonOutput;

impl JsonOutput {
    /// Format data as JSON string
    ///
    /// Uses pretty-printing by default. When `config.compact` is true,
    /// outputs minified JSON on a single line.
    pub fn format<T: Serialize + ?Sized>(data: &T, config: &OutputConfig) -> String {
        if config.compact {
            serde_json::to_string(data).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string_pretty(data)
                .unwrap_or_else(|e| format!("{{\n  \"error\": \"{}\"\n}}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::OutputFormat;
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: i64,
        name: String,
    }

    #[test]
    fn test_format_pretty() {
        let data = Row {
            id: 7,
            name: "Lagazuoi".to_string(),
        };
        let output = JsonOutput::format(&data, &OutputConfig::new(OutputFormat::Json));

        assert!(output.contains("\"name\": \"Lagazuoi\""));
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let data = vec![Row {
            id: 1,
            name: "A".to_string(),
        }];
        let config = OutputConfig::new(OutputFormat::Json).compact();
        assert_eq!(JsonOutput::format(&data, &config), r#"[{"id":1,"name":"A"}]"#);
    }
}
