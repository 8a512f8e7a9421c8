//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::HashSet;

use degree3::domain::Degree3Graph;
use degree3::util::testing;

/// Build a tree from `(parent, child)` pairs. Each child is new and lands in the
/// first free slot reachable from the parent; the parent side lands in the child's slot 0.
pub fn tree_from_edges(root: &'static str, edges: &[(&'static str, &'static str)]) -> Degree3Graph<&'static str> {
    testing::init_test_setup();
    let mut graph = Degree3Graph::new();
    graph.insert_isolated(root);
    for (parent, child) in edges {
        assert!(!graph.exists(child), "{} inserted twice", child);
        graph.insert_isolated(*child);
        graph.join_nodes(parent, child).expect("parent has a free slot");
    }
    graph
}

/// a with three leaf children b, c, d.
pub fn star() -> Degree3Graph<&'static str> {
    tree_from_edges("a", &[("a", "b"), ("a", "c"), ("a", "d")])
}

/// Every slot reference is mirrored by a back-reference.
pub fn assert_symmetric<K: degree3::domain::NodeKey>(graph: &Degree3Graph<K>) {
    for key in graph.keys() {
        for neighbor in graph.neighbors(key).unwrap() {
            let back = graph.neighbors(&neighbor).unwrap();
            assert!(back.contains(key), "{:?} -> {:?} has no back-reference", key, neighbor);
        }
    }
}

/// All keys reachable depth-first from `root`.
pub fn reachable<K: degree3::domain::NodeKey>(graph: &Degree3Graph<K>, root: &K) -> HashSet<K> {
    graph.depth_first(root).unwrap().map(|info| info.key).collect()
}
