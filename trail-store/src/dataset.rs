//! JSON seed datasets.
//!
//! A dataset is the whole catalog plus every trail, in one file:
//!
//! ```json
//! {
//!   "shelters": [{"id": 1, "name": "Vajolet", "locality": "Pozza di Fassa",
//!                 "altitude": 2243, "capacity": 60, "is_open": true}],
//!   "trails":   [{"shelter_id1": 1, "shelter_id2": 2, "year": 1998,
//!                 "distance": 3.2, "difficulty": "medium", "duration": "01:10:00"}]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use trail_core::{Shelter, ShelterId};

use super::trails::TrailRecord;

/// Catalog and trails loaded from a seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub shelters: Vec<Shelter>,
    #[serde(default)]
    pub trails: Vec<TrailRecord>,
}

impl Dataset {
    /// Read a dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset: {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Invalid dataset: {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse dataset JSON")
    }

    /// Trails whose endpoints are missing from `shelters`.
    ///
    /// Importing such trails is allowed; the engine reports them when a
    /// snapshot would include them.
    pub fn dangling_trails(&self) -> Vec<&TrailRecord> {
        let ids: HashSet<ShelterId> = self.shelters.iter().map(|s| s.id).collect();
        self.trails
            .iter()
            .filter(|t| !ids.contains(&t.shelter_id1) || !ids.contains(&t.shelter_id2))
            .collect()
    }
}
