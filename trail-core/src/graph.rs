//! Temporal graph engine powered by petgraph.
//!
//! Loads the shelter catalog once from a [`RecordStore`], then rebuilds an
//! in-memory undirected snapshot every time a year is selected.
//!
//! # Architecture
//!
//! ```text
//! RecordStore (catalog + dated trails) -> GraphEngine::build(year) -> queries
//! ```
//!
//! # Key Features
//!
//! - **Year filtering**: a snapshot contains only trails with `year <= Y`,
//!   and only shelters touched by at least one of them.
//! - **Idempotent insertion**: duplicate trails collapse to one edge.
//! - **O(V+E) queries**: connected components, degree, reachability.

use petgraph::algo::connected_components;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::{GraphError, Result};
use crate::store::RecordStore;
use crate::traversal::{self, Snapshot, Technique};
use crate::types::{Shelter, ShelterId, TrailEdge};

/// Externally observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    /// No snapshot built yet, or the last build produced no trails.
    Empty,
    /// The snapshot holds at least one trail.
    Built,
}

/// What a successful `build` produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub year: i32,
    pub trails_fetched: usize,
    pub node_count: usize,
    pub edge_count: usize,
    /// Trails that repeated an already-inserted shelter pair.
    pub duplicates: usize,
    pub self_loops: usize,
}

/// Graph engine for year-filtered trail snapshots.
///
/// Holds the immutable shelter catalog and the current snapshot where:
/// - Nodes are shelter ids (only those with at least one trail)
/// - Edges are undirected trails, one per shelter pair
pub struct GraphEngine<S> {
    store: S,
    catalog: HashMap<ShelterId, Shelter>,
    graph: Snapshot,
    year: Option<i32>,
}

impl<S: RecordStore> GraphEngine<S> {
    /// Create an engine and load the shelter catalog from `store`.
    ///
    /// The snapshot starts empty; call [`build`](Self::build) to populate it.
    pub fn new(store: S) -> Result<Self> {
        let shelters = store.fetch_all_shelters().map_err(|e| {
            tracing::warn!("Failed to load shelter catalog: {}", e);
            GraphError::from(e)
        })?;

        let mut catalog = HashMap::with_capacity(shelters.len());
        for shelter in shelters {
            if let Some(previous) = catalog.insert(shelter.id, shelter) {
                tracing::warn!(
                    "Duplicate shelter id {} in catalog, keeping the last record",
                    previous.id
                );
            }
        }
        tracing::info!("Loaded catalog with {} shelters", catalog.len());

        Ok(Self {
            store,
            catalog,
            graph: Snapshot::new(),
            year: None,
        })
    }

    /// Rebuild the snapshot from every trail with `year <= year`.
    ///
    /// The previous snapshot is always discarded first. On failure the
    /// engine is left empty and the error says why:
    /// - [`GraphError::StoreUnavailable`] when the trails could not be fetched
    /// - [`GraphError::DanglingShelter`] when a trail points outside the catalog
    pub fn build(&mut self, year: i32) -> Result<BuildSummary> {
        self.graph.clear();
        self.year = None;

        let trails = self.store.fetch_edges_up_to(year).map_err(|e| {
            tracing::warn!("Build for year {} degraded to an empty snapshot: {}", year, e);
            GraphError::from(e)
        })?;

        // All endpoints are checked before the first insert.
        if let Some(err) = trails.iter().find_map(|t| self.dangling(t)) {
            tracing::warn!("Build for year {} rejected: {}", year, err);
            return Err(err);
        }

        let mut duplicates = 0;
        let mut self_loops = 0;
        for trail in &trails {
            let (a, b) = trail.canonical();
            if trail.is_self_loop() {
                self_loops += 1;
            }
            if self.graph.add_edge(a, b, ()).is_some() {
                duplicates += 1;
            }
        }

        self.year = Some(year);

        let summary = BuildSummary {
            year,
            trails_fetched: trails.len(),
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            duplicates,
            self_loops,
        };
        tracing::info!(
            "Built snapshot for {}: {} shelters, {} trails ({} duplicates, {} self-loops)",
            year,
            summary.node_count,
            summary.edge_count,
            duplicates,
            self_loops
        );
        Ok(summary)
    }

    fn dangling(&self, trail: &TrailEdge) -> Option<GraphError> {
        [trail.shelter_id1, trail.shelter_id2]
            .into_iter()
            .find(|id| !self.catalog.contains_key(id))
            .map(|missing| GraphError::DanglingShelter {
                missing,
                shelter_id: trail.shelter_id1,
                other_id: trail.shelter_id2,
                year: trail.year,
            })
    }
}

impl<S> GraphEngine<S> {
    pub fn state(&self) -> EngineState {
        if self.graph.node_count() == 0 {
            EngineState::Empty
        } else {
            EngineState::Built
        }
    }

    /// Year of the last successful build.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// The underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read-only view of the current snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.graph
    }

    /// Every shelter in the catalog, sorted by name.
    pub fn catalog(&self) -> Vec<&Shelter> {
        let mut shelters: Vec<&Shelter> = self.catalog.values().collect();
        shelters.sort();
        shelters
    }

    /// Look up a catalog shelter by id.
    pub fn shelter(&self, id: ShelterId) -> Option<&Shelter> {
        self.catalog.get(&id)
    }

    /// Look up a catalog shelter by exact name (case-insensitive, Unicode).
    ///
    /// When several shelters share a name, the one with the lowest id wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Shelter> {
        let wanted = name.to_lowercase();
        self.catalog
            .values()
            .filter(|s| s.name.to_lowercase() == wanted)
            .min_by_key(|s| s.id)
    }

    /// Shelters present in the snapshot. No particular order.
    pub fn nodes(&self) -> Vec<&Shelter> {
        self.resolve(self.graph.nodes())
    }

    /// Snapshot edges as canonical `(min, max)` id pairs, sorted.
    pub fn edges(&self) -> Vec<(ShelterId, ShelterId)> {
        let mut edges: Vec<(ShelterId, ShelterId)> = self
            .graph
            .all_edges()
            .map(|(a, b, _)| if a <= b { (a, b) } else { (b, a) })
            .collect();
        edges.sort_unstable();
        edges
    }

    pub fn contains(&self, id: ShelterId) -> bool {
        self.graph.contains_node(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of distinct neighbors of `shelter`; 0 if it has no trails.
    pub fn degree(&self, shelter: &Shelter) -> usize {
        self.degree_of(shelter.id)
    }

    /// Like [`degree`](Self::degree), by id.
    ///
    /// A self-loop counts once, as the shelter being its own neighbor.
    pub fn degree_of(&self, id: ShelterId) -> usize {
        if !self.graph.contains_node(id) {
            return 0;
        }
        self.graph.neighbors(id).count()
    }

    /// Number of connected components; 0 for an empty snapshot.
    pub fn component_count(&self) -> usize {
        if self.graph.node_count() == 0 {
            return 0;
        }
        let count = connected_components(&self.graph);
        debug_assert_eq!(count, traversal::count_components_by_traversal(&self.graph));
        count
    }

    /// Shelters reachable on foot from `start`, excluding `start`, sorted by name.
    ///
    /// Returns an empty list when `start` has no trails in the snapshot.
    pub fn reachable(&self, start: ShelterId) -> Vec<&Shelter> {
        let ids = traversal::reachable_dfs(&self.graph, start);
        debug_assert_eq!(ids, traversal::reachable_bfs(&self.graph, start));

        let mut shelters = self.resolve(ids);
        shelters.sort();
        shelters
    }

    /// Like [`reachable`](Self::reachable), with an explicit traversal technique.
    pub fn reachable_with(&self, start: ShelterId, technique: Technique) -> Vec<&Shelter> {
        let mut shelters = self.resolve(traversal::reachable_ids(&self.graph, start, technique));
        shelters.sort();
        shelters
    }

    /// Connected components as groups of shelters, each sorted by name.
    pub fn components(&self) -> Vec<Vec<&Shelter>> {
        traversal::components(&self.graph)
            .into_iter()
            .map(|group| {
                let mut shelters = self.resolve(group);
                shelters.sort();
                shelters
            })
            .collect()
    }

    /// Snapshot ids always resolve because `build` rejects dangling trails.
    fn resolve<I>(&self, ids: I) -> Vec<&Shelter>
    where
        I: IntoIterator<Item = ShelterId>,
    {
        ids.into_iter()
            .filter_map(|id| self.catalog.get(&id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn catalog() -> Vec<Shelter> {
        vec![
            Shelter::new(1, "A", "Val A", 1800, 40, true),
            Shelter::new(2, "B", "Val B", 2100, 25, true),
            Shelter::new(3, "C", "Val C", 2400, 12, false),
            Shelter::new(4, "D", "Val D", 1950, 60, true),
        ]
    }

    fn create_test_engine(edges: Vec<TrailEdge>) -> GraphEngine<MemoryStore> {
        GraphEngine::new(MemoryStore::new(catalog(), edges)).unwrap()
    }

    fn names(shelters: &[&Shelter]) -> Vec<String> {
        shelters.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_new_engine_is_empty() {
        let engine = create_test_engine(vec![TrailEdge::new(1, 2, 2000)]);
        assert_eq!(engine.state(), EngineState::Empty);
        assert_eq!(engine.year(), None);
        assert_eq!(engine.component_count(), 0);
        assert!(engine.nodes().is_empty());
        assert_eq!(engine.catalog().len(), 4);
    }

    #[test]
    fn test_build_filters_by_year() {
        let mut engine =
            create_test_engine(vec![TrailEdge::new(1, 2, 2000), TrailEdge::new(2, 3, 2010)]);

        let summary = engine.build(2000).unwrap();
        assert_eq!(summary.node_count, 2);
        assert_eq!(summary.edge_count, 1);
        assert_eq!(engine.state(), EngineState::Built);
        assert_eq!(engine.year(), Some(2000));
        assert!(!engine.contains(3));

        engine.build(2010).unwrap();
        assert_eq!(engine.node_count(), 3);
        assert_eq!(engine.edges(), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn test_duplicate_and_reversed_trails_collapse() {
        let mut engine = create_test_engine(vec![
            TrailEdge::new(1, 2, 1990),
            TrailEdge::new(2, 1, 1995),
            TrailEdge::new(1, 2, 2000),
        ]);
        let summary = engine.build(2000).unwrap();
        assert_eq!(summary.trails_fetched, 3);
        assert_eq!(summary.edge_count, 1);
        assert_eq!(summary.duplicates, 2);
        assert_eq!(engine.degree_of(1), 1);
    }

    #[test]
    fn test_self_loop_counts_once_toward_degree() {
        let mut engine =
            create_test_engine(vec![TrailEdge::new(4, 4, 2000), TrailEdge::new(4, 1, 2000)]);
        let summary = engine.build(2000).unwrap();
        assert_eq!(summary.self_loops, 1);
        assert_eq!(engine.degree_of(4), 2);
        assert_eq!(engine.component_count(), 1);
        assert_eq!(names(&engine.reachable(4)), vec!["A"]);
    }

    #[test]
    fn test_degree_of_absent_shelter_is_zero() {
        let mut engine = create_test_engine(vec![TrailEdge::new(1, 2, 2000)]);
        engine.build(2000).unwrap();
        let absent = engine.shelter(3).cloned().unwrap();
        assert_eq!(engine.degree(&absent), 0);
        assert_eq!(engine.degree_of(12345), 0);
    }

    #[test]
    fn test_dangling_trail_fails_and_leaves_empty() {
        let mut engine =
            create_test_engine(vec![TrailEdge::new(1, 2, 2000), TrailEdge::new(2, 99, 2000)]);
        let err = engine.build(2000).unwrap_err();
        assert_eq!(
            err,
            GraphError::DanglingShelter {
                missing: 99,
                shelter_id: 2,
                other_id: 99,
                year: 2000
            }
        );
        assert_eq!(engine.state(), EngineState::Empty);
        assert_eq!(engine.node_count(), 0);
        assert_eq!(engine.year(), None);
    }

    #[test]
    fn test_unavailable_store_leaves_empty_snapshot() {
        let mut engine = create_test_engine(vec![TrailEdge::new(1, 2, 2000)]);
        engine.build(2000).unwrap();
        assert_eq!(engine.state(), EngineState::Built);

        engine.store.set_available(false);
        let err = engine.build(2000).unwrap_err();
        assert!(err.is_unavailable());
        assert_eq!(engine.state(), EngineState::Empty);
        assert_eq!(engine.component_count(), 0);
        assert!(engine.reachable(1).is_empty());
    }

    #[test]
    fn test_catalog_load_failure() {
        let result = GraphEngine::new(MemoryStore::unavailable());
        assert!(matches!(result, Err(GraphError::StoreUnavailable(_))));
    }

    #[test]
    fn test_find_by_name() {
        let engine = create_test_engine(vec![]);
        assert_eq!(engine.find_by_name("c").map(|s| s.id), Some(3));
        assert!(engine.find_by_name("Z").is_none());
    }

    #[test]
    fn test_find_by_name_folds_accented_capitals() {
        let store = MemoryStore::new(
            vec![
                Shelter::new(7, "Rifugio Città di Fiume", "Borca", 1918, 40, true),
                Shelter::new(8, "Èrbe", "Passo delle Erbe", 1987, 30, true),
            ],
            vec![],
        );
        let engine = GraphEngine::new(store).unwrap();
        assert_eq!(
            engine.find_by_name("RIFUGIO CITTÀ DI FIUME").map(|s| s.id),
            Some(7)
        );
        assert_eq!(engine.find_by_name("èrbe").map(|s| s.id), Some(8));
    }

    #[test]
    fn test_components_grouped_by_name() {
        let mut engine =
            create_test_engine(vec![TrailEdge::new(2, 1, 2000), TrailEdge::new(4, 3, 2000)]);
        engine.build(2000).unwrap();
        let groups: Vec<Vec<String>> = engine.components().iter().map(|g| names(g)).collect();
        assert_eq!(groups, vec![vec!["A", "B"], vec!["C", "D"]]);
    }

    #[test]
    fn test_reachable_with_each_technique() {
        let mut engine = create_test_engine(vec![
            TrailEdge::new(1, 2, 2000),
            TrailEdge::new(2, 3, 2000),
            TrailEdge::new(3, 4, 2000),
        ]);
        engine.build(2000).unwrap();
        for technique in Technique::ALL {
            assert_eq!(names(&engine.reachable_with(4, technique)), vec!["A", "B", "C"]);
        }
    }
}
