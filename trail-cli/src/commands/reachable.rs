//! Reachable command - shelters you can walk to from a given shelter

use anyhow::Result;
use colored::Colorize;
use trail_core::Technique;

use super::QueryContext;
use crate::facade::ReachableReport;
use crate::output::{Column, CsvOutput, Output, OutputConfig, Outputter};

impl ReachableReport {
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{}",
            format!(
                "From '{}' you can reach {} shelters on foot:",
                self.start.name,
                self.reachable.len()
            )
            .bold()
        )];

        for shelter in &self.reachable {
            lines.push(format!(
                "[{}] {} ({})",
                shelter.id, shelter.name, shelter.locality
            ));
        }
        lines
    }
}

impl Outputter for ReachableReport {
    fn to_table(&self, _config: &OutputConfig) -> String {
        self.to_lines().join("\n")
    }

    fn to_csv(&self, config: &OutputConfig) -> String {
        let columns = [
            Column::new("id", "id"),
            Column::new("name", "name"),
            Column::new("locality", "locality"),
        ];
        CsvOutput::format_with_columns(&self.reachable, &columns, config)
    }
}

/// Run the reachable command.
///
/// `shelter` is an id or an exact shelter name.
pub fn run(
    ctx: &QueryContext<'_>,
    year: &str,
    shelter: &str,
    technique: Technique,
    output: &OutputConfig,
) -> Result<()> {
    let mut facade = ctx.open_facade(technique)?;
    facade.snapshot(year)?;
    facade.select(shelter)?;

    let report = facade.reachable()?;
    tracing::info!(
        "{} shelters reachable from {} ({})",
        report.reachable.len(),
        report.start.id,
        report.technique
    );
    Output::new(report, output).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::ShelterRow;
    use crate::output::OutputFormat;

    #[test]
    fn test_table_lines() {
        colored::control::set_override(false);
        let report = ReachableReport {
            year: Some(2010),
            technique: "dfs".to_string(),
            start: ShelterRow {
                id: 1,
                name: "A".to_string(),
                locality: "Val A".to_string(),
            },
            reachable: vec![ShelterRow {
                id: 2,
                name: "B".to_string(),
                locality: "Val B".to_string(),
            }],
        };

        let text = report.to_table(&OutputConfig::new(OutputFormat::Table));
        assert_eq!(
            text,
            "From 'A' you can reach 1 shelters on foot:\n[2] B (Val B)"
        );
    }
}
