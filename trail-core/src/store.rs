//! Record store seam.
//!
//! The engine never talks to a database directly. It asks a `RecordStore`
//! for the shelter catalog once, then for the year-filtered trail list on
//! every build.

use crate::error::StoreError;
use crate::types::{Shelter, TrailEdge};

/// Source of shelter and trail records.
pub trait RecordStore {
    /// The full shelter catalog. Called once when an engine is created.
    fn fetch_all_shelters(&self) -> Result<Vec<Shelter>, StoreError>;

    /// Every trail with `year <= year`.
    ///
    /// An empty vector means "no trails yet"; an `Err` means the store
    /// could not answer.
    fn fetch_edges_up_to(&self, year: i32) -> Result<Vec<TrailEdge>, StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn fetch_all_shelters(&self) -> Result<Vec<Shelter>, StoreError> {
        (**self).fetch_all_shelters()
    }

    fn fetch_edges_up_to(&self, year: i32) -> Result<Vec<TrailEdge>, StoreError> {
        (**self).fetch_edges_up_to(year)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn fetch_all_shelters(&self) -> Result<Vec<Shelter>, StoreError> {
        (**self).fetch_all_shelters()
    }

    fn fetch_edges_up_to(&self, year: i32) -> Result<Vec<TrailEdge>, StoreError> {
        (**self).fetch_edges_up_to(year)
    }
}

/// In-memory record store, used by tests and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shelters: Vec<Shelter>,
    edges: Vec<TrailEdge>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new(shelters: Vec<Shelter>, edges: Vec<TrailEdge>) -> Self {
        Self {
            shelters,
            edges,
            unavailable: false,
        }
    }

    /// A store whose every call fails, as if the database were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Toggle availability after construction (catalog already loaded).
    pub fn set_available(&mut self, available: bool) {
        self.unavailable = !available;
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::unavailable("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn fetch_all_shelters(&self) -> Result<Vec<Shelter>, StoreError> {
        self.check()?;
        Ok(self.shelters.clone())
    }

    fn fetch_edges_up_to(&self, year: i32) -> Result<Vec<TrailEdge>, StoreError> {
        self.check()?;
        Ok(self
            .edges
            .iter()
            .filter(|e| e.year <= year)
            .copied()
            .collect())
    }
}
