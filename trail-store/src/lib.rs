//! Storage layer for the trails engine.
//!
//! Provides DuckDB-based storage for the trail network with:
//! - Schema management
//! - Bulk import of shelters and trails from JSON datasets
//! - Year-filtered trail queries
//! - A [`RecordStore`](trail_core::RecordStore) implementation the graph
//!   engine can build snapshots from

mod dataset;
mod schema;
mod trailbase;
mod trails;

pub use dataset::Dataset;
pub use schema::{Difficulty, SCHEMA_VERSION};
pub use trailbase::{AccessMode, TrailBase, TrailStats};
pub use trails::TrailRecord;
