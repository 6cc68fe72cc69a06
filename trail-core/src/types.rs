//! Data models for shelters and trail edges.
//!
//! Shelters are reference data loaded once per engine. Trail edges are the
//! dated, undirected connections the graph snapshot is built from.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable shelter identity (primary key in the record store).
pub type ShelterId = i64;

/// A mountain shelter (refuge) in the trail network.
///
/// Equality and hashing only look at `id`. Ordering is by `name`, with
/// `id` as the tie-breaker so sorted output is deterministic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Shelter {
    pub id: ShelterId,
    pub name: String,
    pub locality: String,
    pub altitude: i32,
    pub capacity: i32,
    pub is_open: bool,
}

impl Shelter {
    pub fn new(
        id: ShelterId,
        name: impl Into<String>,
        locality: impl Into<String>,
        altitude: i32,
        capacity: i32,
        is_open: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            locality: locality.into(),
            altitude,
            capacity,
            is_open,
        }
    }
}

impl PartialEq for Shelter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Shelter {}

impl Hash for Shelter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Shelter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Shelter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for Shelter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rifugio {} ({})", self.name, self.locality)
    }
}

/// The part of a trail record the graph engine consumes.
///
/// Distance, difficulty and duration live on the store's full record and
/// never reach the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailEdge {
    pub shelter_id1: ShelterId,
    pub shelter_id2: ShelterId,
    pub year: i32,
}

impl TrailEdge {
    pub fn new(shelter_id1: ShelterId, shelter_id2: ShelterId, year: i32) -> Self {
        Self {
            shelter_id1,
            shelter_id2,
            year,
        }
    }

    /// Endpoints as a canonical `(min, max)` pair.
    pub fn canonical(&self) -> (ShelterId, ShelterId) {
        if self.shelter_id1 <= self.shelter_id2 {
            (self.shelter_id1, self.shelter_id2)
        } else {
            (self.shelter_id2, self.shelter_id1)
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.shelter_id1 == self.shelter_id2
    }
}
