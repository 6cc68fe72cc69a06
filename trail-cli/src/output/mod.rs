//! Output formatting for the trails CLI
//!
//! Every command result can be rendered as a human-readable table, as JSON,
//! or as CSV. Colors are switched off automatically when stdout is not a TTY.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

mod csv;
mod json;
mod table;

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::table::TableOutput;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
    /// CSV format for spreadsheet/data processing
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub no_color: bool,
    /// Compact mode (single-line JSON, borderless tables)
    pub compact: bool,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            no_color: false,
            compact: false,
        }
    }

    /// Create an OutputConfig with colors disabled when stdout is piped
    /// or `NO_COLOR` is set.
    pub fn auto_detect(format: OutputFormat) -> Self {
        Self {
            no_color: !std::io::stdout().is_terminal() || std::env::var_os("NO_COLOR").is_some(),
            ..Self::new(format)
        }
    }

    pub fn use_colors(&self) -> bool {
        !self.no_color
    }

    /// Builder: disable colors
    pub fn without_colors(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Builder: enable compact mode
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

/// Column definition for table and CSV output
#[derive(Debug, Clone)]
pub struct Column {
    /// Display name for the column header
    pub name: String,
    /// Serialized field the cell value is read from
    pub key: String,
}

impl Column {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// Trait for types that can be formatted as output
pub trait Outputter: Serialize + Sized {
    /// Render as table format
    fn to_table(&self, config: &OutputConfig) -> String;

    /// Render as JSON format
    fn to_json(&self, config: &OutputConfig) -> String {
        JsonOutput::format(self, config)
    }

    /// Render as CSV format
    fn to_csv(&self, config: &OutputConfig) -> String;

    /// Render using the format specified in config
    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Table => self.to_table(config),
            OutputFormat::Json => self.to_json(config),
            OutputFormat::Csv => self.to_csv(config),
        }
    }

    /// Render and print to stdout
    fn output(&self, config: &OutputConfig) {
        println!("{}", self.render(config));
    }
}

/// Result wrapper for formatted output with automatic format selection
pub struct Output<T> {
    data: T,
    config: OutputConfig,
}

impl<T: Outputter> Output<T> {
    pub fn new(data: T, config: &OutputConfig) -> Self {
        Self {
            data,
            config: config.clone(),
        }
    }

    /// Render the output to stdout
    pub fn render(&self) -> anyhow::Result<()> {
        self.data.output(&self.config);
        Ok(())
    }
}

/// Simpler trait for single-message results.
///
/// CSV output falls back to a one-cell document holding the table text.
pub trait TableDisplay: Serialize {
    fn to_table(&self) -> String;
}

impl<T: TableDisplay + Serialize> Outputter for T {
    fn to_table(&self, _config: &OutputConfig) -> String {
        TableDisplay::to_table(self)
    }

    fn to_csv(&self, config: &OutputConfig) -> String {
        CsvOutput::format(self, config)
    }
}

/// Alert shown in place of a result; the previous output stays valid.
#[derive(Debug, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl TableDisplay for Notice {
    fn to_table(&self) -> String {
        use colored::Colorize;
        format!("{} {}", "NOTICE:".yellow().bold(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("mu".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_config_builder() {
        let config = OutputConfig::new(OutputFormat::Json)
            .without_colors()
            .compact();

        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.use_colors());
        assert!(config.compact);
    }

    #[test]
    fn test_auto_detect_keeps_format_and_layout() {
        let config = OutputConfig::auto_detect(OutputFormat::Csv);
        assert_eq!(config.format, OutputFormat::Csv);
        assert!(!config.compact);
    }

    #[test]
    fn test_message_renders_in_every_format() {
        let notice = Notice::new("Select a shelter first.");

        colored::control::set_override(false);
        let table = notice.render(&OutputConfig::new(OutputFormat::Table));
        assert_eq!(table, "NOTICE: Select a shelter first.");

        let json = notice.render(&OutputConfig::new(OutputFormat::Json).compact());
        assert_eq!(json, r#"{"message":"Select a shelter first."}"#);

        let csv = notice.render(&OutputConfig::new(OutputFormat::Csv));
        assert_eq!(csv, "message\nSelect a shelter first.");
    }
}
