//! trails - explore how a mountain trail network grew over the years
//!
//! Shelters are nodes and dated trails are edges. Pick a year to see the
//! network as it stood then: how many separate clusters it had, how well
//! connected each shelter was, and where you could walk from a given one.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use trail_core::Technique;

/// Parse a traversal technique name (bfs, dfs, recursive)
fn parse_technique(s: &str) -> Result<Technique, String> {
    s.parse()
}

mod commands;
mod config;
mod facade;
mod output;
mod trailbase;

use commands::*;
use config::TrailsConfig;
use output::{OutputConfig, OutputFormat};

/// Explore a mountain trail network through time.
#[derive(Parser)]
#[command(name = "trails")]
#[command(author, version)]
#[command(about = "Explore a mountain trail network through time")]
#[command(propagate_version = true)]
#[command(after_help = "Quick Start:
  trails init shelters.json          Create the database from a dataset
  trails snapshot --year 2000        Network as of 2000
  trails reachable --year 2000 12    Where can you walk from shelter 12?
  trails explore                     Interactive mode")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Single-line JSON and borderless tables
    #[arg(long, global = true)]
    compact: bool,

    /// Database path (overrides config and the .trails/trailbase search)
    #[arg(long, global = true, env = "TRAILS_DB")]
    db: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the trail database from a JSON dataset
    Init {
        /// Dataset file: {"shelters": [...], "trails": [...]}
        dataset: String,

        /// Re-import even if the database exists
        #[arg(short, long)]
        force: bool,
    },

    /// List every shelter in the catalog
    #[command(visible_alias = "ls")]
    Shelters,

    /// Build the network for a year and list its shelters
    #[command(visible_alias = "snap")]
    Snapshot {
        /// Include trails opened in or before this year
        #[arg(short, long)]
        year: String,
    },

    /// Shelters reachable on foot from a shelter
    #[command(visible_alias = "reach")]
    Reachable {
        /// Shelter id or exact name
        shelter: String,

        /// Include trails opened in or before this year
        #[arg(short, long)]
        year: String,

        /// Traversal technique: bfs, dfs, recursive
        #[arg(long, default_value = "dfs", value_parser = parse_technique)]
        technique: Technique,
    },

    /// Interactive year and shelter picker
    Explore {
        /// Traversal technique: bfs, dfs, recursive
        #[arg(long, default_value = "dfs", value_parser = parse_technique)]
        technique: Technique,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Rendering settings: TTY detection, then the config color override, then `--compact`.
fn output_config(format: OutputFormat, compact: bool, color: Option<bool>) -> OutputConfig {
    let mut output = OutputConfig::auto_detect(format);
    match color {
        Some(false) => output = output.without_colors(),
        Some(true) => output.no_color = false,
        None => {}
    }
    if compact {
        output = output.compact();
    }
    output
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = TrailsConfig::load(std::path::Path::new("."));

    // CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    let output = output_config(format, cli.compact, config.use_color());
    colored::control::set_override(output.use_colors());

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    let ctx = QueryContext {
        db: cli.db.as_deref(),
        config: &config,
    };

    match command {
        Commands::Init { dataset, force } => {
            init::run(&dataset, force, cli.db.as_deref(), &config, &output)
        }
        Commands::Shelters => shelters::run(&ctx, &output),
        Commands::Snapshot { year } => snapshot::run(&ctx, &year, &output),
        Commands::Reachable {
            shelter,
            year,
            technique,
        } => reachable::run(&ctx, &year, &shelter, technique, &output),
        Commands::Explore { technique } => explore::run(&ctx, technique, &output),
    }
}
