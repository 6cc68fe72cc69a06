//! Reachability and connectivity over an immutable snapshot.
//!
//! Every function here is pure: it borrows the snapshot and never mutates
//! it. The traversals exist in several independent flavours so they can be
//! checked against each other; they must always agree on the vertex set.

use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use crate::types::ShelterId;

/// Undirected snapshot graph keyed directly by shelter id.
///
/// `GraphMap` keeps at most one edge per unordered pair, which gives
/// idempotent insertion for free.
pub type Snapshot = UnGraphMap<ShelterId, ()>;

/// Traversal technique used to answer a reachability query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Technique {
    /// Iterative breadth-first search with an explicit FIFO queue.
    BreadthFirst,
    /// petgraph's depth-first walker.
    #[default]
    DepthFirst,
    /// Hand-written recursive depth-first search.
    DepthFirstRecursive,
}

impl Technique {
    pub const ALL: [Technique; 3] = [
        Technique::BreadthFirst,
        Technique::DepthFirst,
        Technique::DepthFirstRecursive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Technique::BreadthFirst => "bfs",
            Technique::DepthFirst => "dfs",
            Technique::DepthFirstRecursive => "recursive",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Technique {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Technique::BreadthFirst),
            "dfs" | "depth-first" => Ok(Technique::DepthFirst),
            "recursive" | "dfs-recursive" => Ok(Technique::DepthFirstRecursive),
            _ => Err(format!(
                "Unknown traversal technique: '{}' (expected bfs, dfs or recursive)",
                s
            )),
        }
    }
}

/// Ids reachable from `start` using `technique`, excluding `start`.
pub fn reachable_ids(graph: &Snapshot, start: ShelterId, technique: Technique) -> HashSet<ShelterId> {
    match technique {
        Technique::BreadthFirst => reachable_bfs(graph, start),
        Technique::DepthFirst => reachable_dfs(graph, start),
        Technique::DepthFirstRecursive => reachable_dfs_recursive(graph, start),
    }
}

/// Breadth-first reachability: O(V + E).
///
/// Nodes at hop distance k are all discovered before any node at k + 1.
/// Returns an empty set when `start` is not in the snapshot.
pub fn reachable_bfs(graph: &Snapshot, start: ShelterId) -> HashSet<ShelterId> {
    if !graph.contains_node(start) {
        return HashSet::new();
    }

    let mut visited: HashSet<ShelterId> = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in graph.neighbors(current) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited.remove(&start);
    visited
}

/// Depth-first reachability using petgraph's `Dfs` walker: O(V + E).
pub fn reachable_dfs(graph: &Snapshot, start: ShelterId) -> HashSet<ShelterId> {
    if !graph.contains_node(start) {
        return HashSet::new();
    }

    let mut dfs = Dfs::new(graph, start);
    let mut reached = HashSet::new();
    while let Some(node) = dfs.next(graph) {
        if node != start {
            reached.insert(node);
        }
    }
    reached
}

/// Deepest call chain `reachable_dfs_recursive` builds before handing
/// nodes to its worklist.
pub const MAX_RECURSION_DEPTH: usize = 1024;

/// Recursive depth-first reachability.
///
/// Recursion stops at [`MAX_RECURSION_DEPTH`]; nodes discovered below that
/// depth are queued and explored by a fresh recursive descent, so a long
/// trail chain cannot exhaust the thread stack.
pub fn reachable_dfs_recursive(graph: &Snapshot, start: ShelterId) -> HashSet<ShelterId> {
    if !graph.contains_node(start) {
        return HashSet::new();
    }

    fn visit(
        graph: &Snapshot,
        node: ShelterId,
        depth: usize,
        visited: &mut HashSet<ShelterId>,
        deferred: &mut Vec<ShelterId>,
    ) {
        for neighbor in graph.neighbors(node) {
            if visited.insert(neighbor) {
                if depth < MAX_RECURSION_DEPTH {
                    visit(graph, neighbor, depth + 1, visited, deferred);
                } else {
                    deferred.push(neighbor);
                }
            }
        }
    }

    let mut visited = HashSet::new();
    let mut deferred = Vec::new();
    visited.insert(start);
    visit(graph, start, 0, &mut visited, &mut deferred);
    while let Some(node) = deferred.pop() {
        visit(graph, node, 0, &mut visited, &mut deferred);
    }
    visited.remove(&start);
    visited
}

/// Count connected components by flooding from every unvisited node.
///
/// This is the reference definition `GraphEngine::component_count` must
/// agree with.
pub fn count_components_by_traversal(graph: &Snapshot) -> usize {
    let mut seen: HashSet<ShelterId> = HashSet::with_capacity(graph.node_count());
    let mut count = 0;

    for node in graph.nodes() {
        if !seen.insert(node) {
            continue;
        }
        count += 1;
        seen.extend(reachable_bfs(graph, node));
    }

    count
}

/// Group the snapshot into its connected components.
///
/// Each component is sorted by id; components are ordered by their
/// smallest id.
pub fn components(graph: &Snapshot) -> Vec<Vec<ShelterId>> {
    let mut seen: HashSet<ShelterId> = HashSet::with_capacity(graph.node_count());
    let mut groups = Vec::new();

    for node in graph.nodes() {
        if seen.contains(&node) {
            continue;
        }
        let mut group: Vec<ShelterId> = reachable_bfs(graph, node).into_iter().collect();
        group.push(node);
        seen.extend(group.iter().copied());
        group.sort_unstable();
        groups.push(group);
    }

    groups.sort_by_key(|g| g[0]);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two components: a path 1-2-3-4 with a chord 2-4, and a pair 10-11.
    fn create_test_graph() -> Snapshot {
        let mut g = Snapshot::new();
        g.add_edge(1, 2, ());
        g.add_edge(2, 3, ());
        g.add_edge(3, 4, ());
        g.add_edge(2, 4, ());
        g.add_edge(10, 11, ());
        g
    }

    fn set(ids: &[ShelterId]) -> HashSet<ShelterId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_bfs_reachability() {
        let g = create_test_graph();
        assert_eq!(reachable_bfs(&g, 1), set(&[2, 3, 4]));
        assert_eq!(reachable_bfs(&g, 11), set(&[10]));
    }

    #[test]
    fn test_all_techniques_agree_from_every_node() {
        let g = create_test_graph();
        for start in g.nodes() {
            let expected = reachable_bfs(&g, start);
            assert!(!expected.contains(&start));
            for technique in Technique::ALL {
                assert_eq!(
                    reachable_ids(&g, start, technique),
                    expected,
                    "{} disagrees from {}",
                    technique,
                    start
                );
            }
        }
    }

    #[test]
    fn test_absent_start_is_empty() {
        let g = create_test_graph();
        for technique in Technique::ALL {
            assert!(reachable_ids(&g, 42, technique).is_empty());
        }
    }

    #[test]
    fn test_self_loop_does_not_reach_itself() {
        let mut g = Snapshot::new();
        g.add_edge(5, 5, ());
        g.add_edge(5, 6, ());
        for technique in Technique::ALL {
            assert_eq!(reachable_ids(&g, 5, technique), set(&[6]));
        }
    }

    #[test]
    fn test_recursive_dfs_survives_long_chain() {
        let mut g = Snapshot::new();
        for id in 1..200_000 {
            g.add_edge(id, id + 1, ());
        }
        let reached = reachable_dfs_recursive(&g, 1);
        assert_eq!(reached.len(), 199_999);
        assert!(reached.contains(&200_000));

        let from_middle = reachable_dfs_recursive(&g, 100_000);
        assert_eq!(from_middle, reachable_bfs(&g, 100_000));
    }

    #[test]
    fn test_component_counting() {
        let g = create_test_graph();
        assert_eq!(count_components_by_traversal(&g), 2);
        assert_eq!(count_components_by_traversal(&Snapshot::new()), 0);
    }

    #[test]
    fn test_components_grouping() {
        let g = create_test_graph();
        assert_eq!(components(&g), vec![vec![1, 2, 3, 4], vec![10, 11]]);
    }

    #[test]
    fn test_technique_parse() {
        assert_eq!("BFS".parse::<Technique>(), Ok(Technique::BreadthFirst));
        assert_eq!("dfs".parse::<Technique>(), Ok(Technique::DepthFirst));
        assert_eq!(
            "recursive".parse::<Technique>(),
            Ok(Technique::DepthFirstRecursive)
        );
        assert!("dijkstra".parse::<Technique>().is_err());
    }
}
