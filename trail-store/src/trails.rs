//! Trail record model.

use super::schema::Difficulty;
use serde::{Deserialize, Serialize};
use trail_core::{ShelterId, TrailEdge};

/// A full trail row as stored in the database.
///
/// The graph engine only sees the [`TrailEdge`] projection of this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailRecord {
    pub shelter_id1: ShelterId,
    pub shelter_id2: ShelterId,
    /// Year the trail was opened
    pub year: i32,
    /// Length in kilometres
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Walking time, e.g. "02:30:00"
    #[serde(default)]
    pub duration: Option<String>,
}

impl TrailRecord {
    /// Create a trail with no display attributes.
    pub fn new(shelter_id1: ShelterId, shelter_id2: ShelterId, year: i32) -> Self {
        Self {
            shelter_id1,
            shelter_id2,
            year,
            distance: None,
            difficulty: None,
            duration: None,
        }
    }

    pub fn with_distance(mut self, km: f64) -> Self {
        self.distance = Some(km);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn edge(&self) -> TrailEdge {
        TrailEdge::new(self.shelter_id1, self.shelter_id2, self.year)
    }
}
