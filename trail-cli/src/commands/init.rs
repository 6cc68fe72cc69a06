//! Init command - create the trail database from a JSON dataset

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use trail_store::{Dataset, TrailBase};

use crate::config::TrailsConfig;
use crate::output::{Output, OutputConfig, TableDisplay};
use crate::trailbase::trailbase_path;

/// Result of an import
#[derive(Debug, Serialize)]
pub struct InitResult {
    pub success: bool,
    pub db_path: String,
    pub shelter_count: usize,
    pub trail_count: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    /// Trails whose endpoints are missing from the catalog
    pub dangling_trails: usize,
    pub duration_ms: u64,
}

impl TableDisplay for InitResult {
    fn to_table(&self) -> String {
        let mut output = format!(
            "{} Trail database initialized\n",
            "SUCCESS:".green().bold()
        );

        output.push_str(&format!("\n{}\n", "Summary".cyan().bold()));
        output.push_str(&format!("  Database: {}\n", self.db_path));
        output.push_str(&format!(
            "  Duration: {}ms\n",
            self.duration_ms.to_string().yellow()
        ));

        output.push_str(&format!("\n{}\n", "Network".cyan().bold()));
        output.push_str(&format!(
            "  Shelters: {}\n",
            self.shelter_count.to_string().green()
        ));
        output.push_str(&format!(
            "  Trails:   {}\n",
            self.trail_count.to_string().green()
        ));
        if let (Some(first), Some(last)) = (self.first_year, self.last_year) {
            output.push_str(&format!("  Years:    {}-{}\n", first, last));
        }

        if self.dangling_trails > 0 {
            output.push_str(&format!(
                "\n{} {} trails reference unknown shelters; snapshots including them will fail\n",
                "WARNING:".yellow().bold(),
                self.dangling_trails
            ));
        }

        output.trim_end().to_string()
    }
}

/// Where `init` writes: `--db`, then config, then `./.trails/trailbase`.
fn target_path(db: Option<&str>, config: &TrailsConfig) -> PathBuf {
    db.or(config.db_path())
        .map(PathBuf::from)
        .unwrap_or_else(|| trailbase_path(Path::new(".")))
}

/// Run the init command.
pub fn run(
    dataset_path: &str,
    force: bool,
    db: Option<&str>,
    config: &TrailsConfig,
    output: &OutputConfig,
) -> Result<()> {
    let start = Instant::now();
    let db_path = target_path(db, config);

    if db_path.exists() && !force {
        let base = TrailBase::open_read_only(&db_path)?;
        let stats = base.stats()?;
        println!(
            "{} Trail database already initialized. Use --force to re-import.",
            "INFO:".yellow().bold()
        );
        println!("  Shelters: {}", stats.shelter_count);
        println!("  Trails:   {}", stats.trail_count);
        return Ok(());
    }

    let dataset = Dataset::load(dataset_path)?;

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let base = TrailBase::open(&db_path)?;
    base.import_dataset(&dataset)?;
    let stats = base.stats()?;

    tracing::info!(
        "Imported {} shelters and {} trails into {}",
        stats.shelter_count,
        stats.trail_count,
        db_path.display()
    );

    let result = InitResult {
        success: true,
        db_path: db_path.display().to_string(),
        shelter_count: stats.shelter_count,
        trail_count: stats.trail_count,
        first_year: stats.first_year,
        last_year: stats.last_year,
        dangling_trails: dataset.dangling_trails().len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };

    Output::new(result, output).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_path_precedence() {
        let config: TrailsConfig = toml::from_str("[store]\npath = \"from/config\"\n").unwrap();
        assert_eq!(target_path(Some("flag"), &config), PathBuf::from("flag"));
        assert_eq!(target_path(None, &config), PathBuf::from("from/config"));
        assert_eq!(
            target_path(None, &TrailsConfig::default()),
            PathBuf::from("./.trails/trailbase")
        );
    }
}
