//! Table output formatting using the `tabled` crate

use super::{Column, OutputConfig};
use serde::Serialize;
use tabled::{builder::Builder, settings::style::Style};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Format data as a table with the given columns
    pub fn format_with_columns<T: Serialize>(
        data: &[T],
        columns: &[Column],
        config: &OutputConfig,
    ) -> String {
        if data.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();

        let headers: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        builder.push_record(headers);

        for item in data {
            let json = serde_json::to_value(item).unwrap_or_default();
            let row: Vec<String> = columns
                .iter()
                .map(|col| Self::value_to_string(json.get(&col.key)))
                .collect();
            builder.push_record(row);
        }

        let mut table = builder.build();
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }

        table.to_string()
    }

    fn value_to_string(value: Option<&serde_json::Value>) -> String {
        match value {
            None | Some(serde_json::Value::Null) => "-".to_string(),
            Some(serde_json::Value::Bool(b)) => if *b { "yes" } else { "no" }.to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::OutputFormat;
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: String,
        is_open: bool,
        altitude: Option<i32>,
    }

    #[test]
    fn test_format_with_columns() {
        let data = vec![
            Row {
                name: "Lagazuoi".to_string(),
                is_open: true,
                altitude: Some(2752),
            },
            Row {
                name: "Brentei".to_string(),
                is_open: false,
                altitude: None,
            },
        ];
        let columns = vec![
            Column::new("Name", "name"),
            Column::new("Open", "is_open"),
            Column::new("Altitude", "altitude"),
        ];
        let output =
            TableOutput::format_with_columns(&data, &columns, &OutputConfig::new(OutputFormat::Table));

        assert!(output.contains("Lagazuoi"));
        assert!(output.contains("2752"));
        assert!(output.contains("yes"));
        assert!(output.contains("no"));
        assert!(output.contains('╭'));
    }

    #[test]
    fn test_empty_table() {
        let columns = vec![Column::new("Name", "name")];
        let output = TableOutput::format_with_columns::<Row>(
            &[],
            &columns,
            &OutputConfig::new(OutputFormat::Table),
        );
        assert_eq!(output, "(no results)");
    }
}
