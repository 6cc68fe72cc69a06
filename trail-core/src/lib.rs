//! Trails core - temporal graph engine for a mountain trail network.
//!
//! Given a year, builds the undirected network of shelters connected by
//! trails opened no later than that year, and answers questions about it:
//! which shelters are in the network, how many disjoint clusters it has,
//! how many neighbors each shelter has, and where you can walk to from a
//! given shelter.
//!
//! # Usage
//!
//! ```
//! use trail_core::{GraphEngine, MemoryStore, Shelter, TrailEdge};
//!
//! let store = MemoryStore::new(
//!     vec![
//!         Shelter::new(1, "A", "Val A", 1800, 40, true),
//!         Shelter::new(2, "B", "Val B", 2100, 25, true),
//!     ],
//!     vec![TrailEdge::new(1, 2, 2000)],
//! );
//! let mut engine = GraphEngine::new(store).unwrap();
//! engine.build(2000).unwrap();
//!
//! assert_eq!(engine.component_count(), 1);
//! assert_eq!(engine.reachable(1)[0].name, "B");
//! ```

pub mod error;
pub mod graph;
pub mod shared;
pub mod store;
pub mod traversal;
pub mod types;

pub use error::{GraphError, Result, StoreError};
pub use graph::{BuildSummary, EngineState, GraphEngine};
pub use shared::SharedEngine;
pub use store::{MemoryStore, RecordStore};
pub use traversal::{Snapshot, Technique};
pub use types::{Shelter, ShelterId, TrailEdge};
