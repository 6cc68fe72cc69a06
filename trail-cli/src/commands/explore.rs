//! Explore command - interactive year and shelter picker
//!
//! Loop: choose an action, then either type a year to rebuild the network
//! or pick a shelter from the current snapshot to see where it leads.
//! Invalid input prints a notice and leaves the previous state untouched.

use anyhow::Result;
use dialoguer::{Input, Select};
use std::io::IsTerminal;
use trail_core::{RecordStore, ShelterId, Technique};

use super::QueryContext;
use crate::facade::{FacadeError, QueryFacade};
use crate::output::{Notice, Output, OutputConfig};

const ACTIONS: [&str; 3] = ["Build network for a year", "Reachable shelters", "Quit"];

/// Run the explore command.
pub fn run(ctx: &QueryContext<'_>, technique: Technique, output: &OutputConfig) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("'trails explore' needs an interactive terminal");
    }

    let mut facade = ctx.open_facade(technique)?;

    loop {
        let action = Select::new()
            .with_prompt("What next?")
            .items(&ACTIONS)
            .default(0)
            .interact_opt()?;

        let outcome = match action {
            Some(0) => build_step(&mut facade, output),
            Some(1) => reachable_step(&mut facade, output),
            _ => return Ok(()),
        };

        if let Err(e) = outcome {
            tracing::debug!("explore: {:?}", e);
            Output::new(Notice::new(e.to_string()), output).render()?;
        }
    }
}

fn build_step<S: RecordStore>(
    facade: &mut QueryFacade<S>,
    output: &OutputConfig,
) -> Result<(), StepError> {
    let year = Input::<String>::new()
        .with_prompt("Year")
        .allow_empty(true)
        .interact_text()?;

    let report = facade.snapshot(&year)?;
    Output::new(report, output).render()?;
    Ok(())
}

fn reachable_step<S: RecordStore>(
    facade: &mut QueryFacade<S>,
    output: &OutputConfig,
) -> Result<(), StepError> {
    let choices: Vec<(ShelterId, String)> = facade
        .choices()
        .into_iter()
        .map(|s| (s.id, format!("{} ({})", s.name, s.locality)))
        .collect();

    if !choices.is_empty() {
        let labels: Vec<&str> = choices.iter().map(|(_, label)| label.as_str()).collect();
        let default = facade
            .selected()
            .and_then(|current| choices.iter().position(|(id, _)| *id == current.id))
            .unwrap_or(0);

        let picked = Select::new()
            .with_prompt("Shelter")
            .items(&labels)
            .default(default)
            .interact_opt()?;

        if let Some(index) = picked {
            facade.select_id(choices[index].0)?;
        }
    }

    let report = facade.reachable()?;
    Output::new(report, output).render()?;
    Ok(())
}

/// Failures of one loop iteration; all of them are shown as a notice.
#[derive(Debug, thiserror::Error)]
enum StepError {
    #[error(transparent)]
    Facade(#[from] FacadeError),

    #[error("Input error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
