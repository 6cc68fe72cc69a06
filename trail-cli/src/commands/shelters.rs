//! Shelters command - list the whole catalog

use anyhow::Result;
use serde::Serialize;
use trail_core::Shelter;

use super::QueryContext;
use crate::output::{Column, CsvOutput, Output, OutputConfig, Outputter, TableOutput};

/// Every shelter in the catalog, sorted by name.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ShelterList {
    pub shelters: Vec<Shelter>,
}

fn columns() -> [Column; 6] {
    [
        Column::new("ID", "id"),
        Column::new("Name", "name"),
        Column::new("Locality", "locality"),
        Column::new("Altitude", "altitude"),
        Column::new("Capacity", "capacity"),
        Column::new("Open", "is_open"),
    ]
}

impl Outputter for ShelterList {
    fn to_table(&self, config: &OutputConfig) -> String {
        TableOutput::format_with_columns(&self.shelters, &columns(), config)
    }

    fn to_csv(&self, config: &OutputConfig) -> String {
        CsvOutput::format_with_columns(&self.shelters, &columns(), config)
    }
}

/// Run the shelters command.
pub fn run(ctx: &QueryContext<'_>, output: &OutputConfig) -> Result<()> {
    let facade = ctx.open_facade(Default::default())?;
    let shelters = facade.engine().catalog().into_iter().cloned().collect();

    Output::new(ShelterList { shelters }, output).render()
}
