//! Snapshot command - build the network for a year and list its shelters

use anyhow::Result;
use colored::Colorize;
use trail_core::Technique;

use super::QueryContext;
use crate::facade::SnapshotReport;
use crate::output::{Column, CsvOutput, Output, OutputConfig, Outputter};

impl SnapshotReport {
    /// Plain listing shared by the `snapshot` and `explore` commands.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "{}",
                format!(
                    "The graph has {} connected components.",
                    self.component_count
                )
                .bold()
            ),
            "Node details:".to_string(),
        ];

        for node in &self.nodes {
            lines.push(format!(
                "[{}] Rifugio {} ({}) -- {} neighbors",
                node.index, node.name, node.locality, node.degree
            ));
        }
        lines
    }
}

impl Outputter for SnapshotReport {
    fn to_table(&self, _config: &OutputConfig) -> String {
        self.to_lines().join("\n")
    }

    fn to_csv(&self, config: &OutputConfig) -> String {
        let columns = [
            Column::new("index", "index"),
            Column::new("id", "id"),
            Column::new("name", "name"),
            Column::new("locality", "locality"),
            Column::new("degree", "degree"),
        ];
        CsvOutput::format_with_columns(&self.nodes, &columns, config)
    }
}

/// Run the snapshot command.
pub fn run(ctx: &QueryContext<'_>, year: &str, output: &OutputConfig) -> Result<()> {
    let mut facade = ctx.open_facade(Technique::default())?;
    let report = facade.snapshot(year)?;

    tracing::info!(
        "Snapshot {}: {} shelters, {} components",
        report.year,
        report.nodes.len(),
        report.component_count
    );
    Output::new(report, output).render()
}
