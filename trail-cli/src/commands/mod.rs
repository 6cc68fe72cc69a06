//! Command implementations for the trails CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod explore;
pub mod init;
pub mod reachable;
pub mod shelters;
pub mod snapshot;

use anyhow::{Context, Result};
use std::path::PathBuf;
use trail_core::{GraphEngine, Technique};
use trail_store::TrailBase;

use crate::config::TrailsConfig;
use crate::facade::QueryFacade;
use crate::trailbase::find_trailbase;

/// Settings every query command needs, resolved once in `main`.
pub struct QueryContext<'a> {
    /// `--db` flag value, if given
    pub db: Option<&'a str>,
    pub config: &'a TrailsConfig,
}

impl QueryContext<'_> {
    /// Database path: `--db` flag, then config, then upward search.
    pub fn db_path(&self) -> Result<PathBuf> {
        if let Some(path) = self.db.or(self.config.db_path()) {
            return Ok(PathBuf::from(path));
        }
        find_trailbase(".")
    }

    /// Open the database read-only and wrap a fresh engine in a facade.
    pub fn open_facade(&self, technique: Technique) -> Result<QueryFacade<TrailBase>> {
        let path = self.db_path()?;
        tracing::debug!("Opening trail database at {}", path.display());

        let store = TrailBase::open_read_only(&path)
            .with_context(|| format!("Cannot open trail database at {}", path.display()))?;
        let engine = GraphEngine::new(store).context("Failed to load the shelter catalog")?;

        Ok(QueryFacade::new(engine, self.config.year_range()).with_technique(technique))
    }
}
