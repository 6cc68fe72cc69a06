//! Configuration loading from `.trailsrc.toml`.
//!
//! Configuration is optional. Without a config file every command uses the
//! defaults below.
//!
//! # Example Configuration
//!
//! ```toml
//! [store]
//! path = ".trails/trailbase"
//!
//! [query]
//! min_year = 1950
//! max_year = 2024
//!
//! [output]
//! format = "table"
//! color = true
//! ```

use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::Path;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".trailsrc.toml";

/// Root configuration structure loaded from `.trailsrc.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct TrailsConfig {
    /// Where the trail database lives.
    #[serde(default)]
    pub store: StoreSettings,

    /// Limits applied to user-supplied queries.
    #[serde(default)]
    pub query: QuerySettings,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Default)]
pub struct StoreSettings {
    /// Database path. When unset the `.trails/trailbase` file is searched
    /// for upward from the working directory.
    #[serde(default)]
    pub path: Option<String>,
}

/// Year bounds accepted when building a snapshot.
#[derive(Debug, Deserialize)]
pub struct QuerySettings {
    #[serde(default = "default_min_year")]
    pub min_year: i32,

    #[serde(default = "default_max_year")]
    pub max_year: i32,
}

fn default_min_year() -> i32 {
    1950
}

fn default_max_year() -> i32 {
    2024
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            max_year: default_max_year(),
        }
    }
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Valid values: `table`, `json`, `csv`. Default: `table`
    #[serde(default)]
    pub format: Option<String>,

    /// Defaults to `true` when stdout is a TTY.
    #[serde(default)]
    pub color: Option<bool>,
}

impl TrailsConfig {
    /// Load configuration from `.trailsrc.toml` in the given directory.
    ///
    /// A missing file yields defaults. Read or parse failures are logged as
    /// warnings and also yield defaults.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Configured database path, if any.
    pub fn db_path(&self) -> Option<&str> {
        self.store.path.as_deref()
    }

    /// Inclusive range of years a snapshot may be built for.
    ///
    /// A reversed range in the file is swapped rather than rejecting every year.
    pub fn year_range(&self) -> RangeInclusive<i32> {
        let (min, max) = (self.query.min_year, self.query.max_year);
        if min <= max {
            min..=max
        } else {
            tracing::warn!("[query] min_year {} > max_year {}, swapping", min, max);
            max..=min
        }
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured value, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}
