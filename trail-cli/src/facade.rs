//! Query facade between user input and the graph engine.
//!
//! Validates the year typed by the user, keeps track of the selected
//! shelter and turns engine answers into report structs the output layer
//! can render. A rejected input never touches the engine, so whatever was
//! displayed before stays valid.

use serde::Serialize;
use std::ops::RangeInclusive;
use thiserror::Error;
use trail_core::{GraphEngine, GraphError, RecordStore, Shelter, ShelterId, Technique};

/// Why a facade request was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FacadeError {
    #[error("Enter a numeric value for the year (got '{input}').")]
    InvalidYear { input: String },

    #[error("Enter a year between {min} and {max} (got {year}).")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("Select a shelter first.")]
    NoSelection,

    #[error("No shelter matches '{query}'.")]
    UnknownShelter { query: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// One node of the snapshot, as listed by `snapshot`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NodeRow {
    /// 1-based position in the name-sorted listing.
    pub index: usize,
    pub id: ShelterId,
    pub name: String,
    pub locality: String,
    pub degree: usize,
}

/// A shelter reference in a reachability listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ShelterRow {
    pub id: ShelterId,
    pub name: String,
    pub locality: String,
}

impl From<&Shelter> for ShelterRow {
    fn from(shelter: &Shelter) -> Self {
        Self {
            id: shelter.id,
            name: shelter.name.clone(),
            locality: shelter.locality.clone(),
        }
    }
}

/// Result of building a snapshot for a year.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotReport {
    pub year: i32,
    pub component_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<NodeRow>,
}

/// Shelters reachable from the selected one.
#[derive(Debug, Clone, Serialize)]
pub struct ReachableReport {
    pub year: Option<i32>,
    pub technique: String,
    pub start: ShelterRow,
    pub reachable: Vec<ShelterRow>,
}

/// Stateful front end over a [`GraphEngine`].
pub struct QueryFacade<S> {
    engine: GraphEngine<S>,
    years: RangeInclusive<i32>,
    technique: Technique,
    selected: Option<ShelterId>,
}

impl<S: RecordStore> QueryFacade<S> {
    pub fn new(engine: GraphEngine<S>, years: RangeInclusive<i32>) -> Self {
        Self {
            engine,
            years,
            technique: Technique::default(),
            selected: None,
        }
    }

    /// Use `technique` for reachability instead of the default walk.
    pub fn with_technique(mut self, technique: Technique) -> Self {
        self.technique = technique;
        self
    }

    pub fn engine(&self) -> &GraphEngine<S> {
        &self.engine
    }

    /// Parse and range-check a year typed by the user.
    pub fn parse_year(&self, input: &str) -> Result<i32, FacadeError> {
        let year: i32 = input.trim().parse().map_err(|_| FacadeError::InvalidYear {
            input: input.to_string(),
        })?;

        if !self.years.contains(&year) {
            return Err(FacadeError::YearOutOfRange {
                year,
                min: *self.years.start(),
                max: *self.years.end(),
            });
        }
        Ok(year)
    }

    /// Build the snapshot for `year_input` and describe it.
    ///
    /// A selection that is no longer part of the new snapshot is dropped.
    pub fn snapshot(&mut self, year_input: &str) -> Result<SnapshotReport, FacadeError> {
        let year = self.parse_year(year_input)?;

        let summary = self.engine.build(year).map_err(|e| {
            self.selected = None;
            FacadeError::from(e)
        })?;

        if let Some(id) = self.selected {
            if !self.engine.contains(id) {
                tracing::debug!("Dropping selection {}: not in the {} snapshot", id, year);
                self.selected = None;
            }
        }

        let mut shelters = self.engine.nodes();
        shelters.sort();

        let nodes = shelters
            .into_iter()
            .enumerate()
            .map(|(i, shelter)| NodeRow {
                index: i + 1,
                id: shelter.id,
                name: shelter.name.clone(),
                locality: shelter.locality.clone(),
                degree: self.engine.degree(shelter),
            })
            .collect();

        Ok(SnapshotReport {
            year,
            component_count: self.engine.component_count(),
            edge_count: summary.edge_count,
            nodes,
        })
    }

    /// Shelters in the current snapshot, sorted by name, for a picker.
    pub fn choices(&self) -> Vec<&Shelter> {
        let mut shelters = self.engine.nodes();
        shelters.sort();
        shelters
    }

    /// Select a shelter by id or by exact (case-insensitive) name.
    pub fn select(&mut self, query: &str) -> Result<ShelterRow, FacadeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FacadeError::NoSelection);
        }

        let shelter = query
            .parse::<ShelterId>()
            .ok()
            .and_then(|id| self.engine.shelter(id))
            .or_else(|| self.engine.find_by_name(query))
            .map(ShelterRow::from)
            .ok_or_else(|| FacadeError::UnknownShelter {
                query: query.to_string(),
            })?;

        self.selected = Some(shelter.id);
        Ok(shelter)
    }

    /// Select a shelter known by id, e.g. from [`choices`](Self::choices).
    pub fn select_id(&mut self, id: ShelterId) -> Result<(), FacadeError> {
        if self.engine.shelter(id).is_none() {
            return Err(FacadeError::UnknownShelter {
                query: id.to_string(),
            });
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn selected(&self) -> Option<&Shelter> {
        self.selected.and_then(|id| self.engine.shelter(id))
    }

    /// Shelters reachable on foot from the selected shelter.
    pub fn reachable(&self) -> Result<ReachableReport, FacadeError> {
        let start = self.selected().ok_or(FacadeError::NoSelection)?;

        let reachable = self
            .engine
            .reachable_with(start.id, self.technique)
            .into_iter()
            .map(ShelterRow::from)
            .collect();

        Ok(ReachableReport {
            year: self.engine.year(),
            technique: self.technique.to_string(),
            start: ShelterRow::from(start),
            reachable,
        })
    }
}
