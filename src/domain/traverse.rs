//! Lazy depth-first, breadth-first and edge-list cursors.
//!
//! Each cursor borrows the store, produces one item per `next()` call and holds no
//! read-ahead beyond its frontier. `close()` drops the frontier so an abandoned walk
//! releases its state deterministically; a closed cursor yields `None`.

use std::collections::{HashSet, VecDeque};
use std::iter::FusedIterator;

use tracing::{instrument, warn};

use crate::domain::error::{GraphError, GraphResult};
use crate::domain::store::{Degree3Graph, NodeKey};

/// A visited key with its occupied neighbors, observed at visit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo<K> {
    pub key: K,
    pub neighbors: Vec<K>,
}

impl<K: NodeKey> Degree3Graph<K> {
    /// Pre-order depth-first walk from `root`, neighbors in slot order.
    #[instrument(level = "trace", skip(self))]
    pub fn depth_first(&self, root: &K) -> GraphResult<DepthFirst<'_, K>> {
        self.require_traversal_root(root)?;
        Ok(DepthFirst {
            graph: self,
            stack: vec![root.clone()],
            visited: HashSet::new(),
        })
    }

    /// Level-order walk from `root`, neighbors in slot order.
    #[instrument(level = "trace", skip(self))]
    pub fn breadth_first(&self, root: &K) -> GraphResult<BreadthFirst<'_, K>> {
        self.require_traversal_root(root)?;
        Ok(BreadthFirst {
            graph: self,
            queue: VecDeque::from([root.clone()]),
            visited: HashSet::from([root.clone()]),
        })
    }

    /// Every edge of the component once, as `(from, to)` with `from` visited first
    /// in depth-first order.
    #[instrument(level = "trace", skip(self))]
    pub fn edge_list(&self, root: &K) -> GraphResult<EdgeList<'_, K>> {
        Ok(EdgeList {
            walk: self.depth_first(root)?,
            seen: HashSet::new(),
            pending: VecDeque::new(),
        })
    }

    fn require_traversal_root(&self, root: &K) -> GraphResult<()> {
        if self.exists(root) {
            Ok(())
        } else {
            Err(GraphError::precondition(format!(
                "traversal root {:?} is not in the store",
                root
            )))
        }
    }

    fn node_info(&self, key: K) -> Option<NodeInfo<K>> {
        match self.neighbors(&key) {
            Ok(neighbors) => Some(NodeInfo { key, neighbors }),
            Err(_) => {
                warn!("skipping dangling reference to {:?}", key);
                None
            }
        }
    }
}

pub struct DepthFirst<'a, K: NodeKey> {
    graph: &'a Degree3Graph<K>,
    stack: Vec<K>,
    visited: HashSet<K>,
}

impl<K: NodeKey> DepthFirst<'_, K> {
    pub fn close(&mut self) {
        self.stack = Vec::new();
    }

    /// True once closed or exhausted.
    pub fn is_closed(&self) -> bool {
        self.stack.is_empty()
    }
}

impl<K: NodeKey> Iterator for DepthFirst<'_, K> {
    type Item = NodeInfo<K>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if !self.visited.insert(current.clone()) {
                continue;
            }
            let Some(info) = self.graph.node_info(current) else {
                continue;
            };
            // reversed so slot 0 is walked first
            for neighbor in info.neighbors.iter().rev() {
                if !self.visited.contains(neighbor) {
                    self.stack.push(neighbor.clone());
                }
            }
            return Some(info);
        }
        None
    }
}

impl<K: NodeKey> FusedIterator for DepthFirst<'_, K> {}

pub struct BreadthFirst<'a, K: NodeKey> {
    graph: &'a Degree3Graph<K>,
    queue: VecDeque<K>,
    visited: HashSet<K>,
}

impl<K: NodeKey> BreadthFirst<'_, K> {
    pub fn close(&mut self) {
        self.queue = VecDeque::new();
    }

    pub fn is_closed(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<K: NodeKey> Iterator for BreadthFirst<'_, K> {
    type Item = NodeInfo<K>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.queue.pop_front() {
            let Some(info) = self.graph.node_info(current) else {
                continue;
            };
            for neighbor in &info.neighbors {
                if self.visited.insert(neighbor.clone()) {
                    self.queue.push_back(neighbor.clone());
                }
            }
            return Some(info);
        }
        None
    }
}

impl<K: NodeKey> FusedIterator for BreadthFirst<'_, K> {}

pub struct EdgeList<'a, K: NodeKey> {
    walk: DepthFirst<'a, K>,
    seen: HashSet<K>,
    pending: VecDeque<(K, K)>,
}

impl<K: NodeKey> EdgeList<'_, K> {
    pub fn close(&mut self) {
        self.walk.close();
        self.pending.clear();
    }

    /// True once closed or exhausted.
    pub fn is_closed(&self) -> bool {
        self.walk.is_closed() && self.pending.is_empty()
    }
}

impl<K: NodeKey> Iterator for EdgeList<'_, K> {
    type Item = (K, K);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(edge) = self.pending.pop_front() {
                return Some(edge);
            }
            let info = self.walk.next()?;
            self.seen.insert(info.key.clone());
            for neighbor in info.neighbors {
                if !self.seen.contains(&neighbor) {
                    self.pending.push_back((info.key.clone(), neighbor));
                }
            }
        }
    }
}

impl<K: NodeKey> FusedIterator for EdgeList<'_, K> {}
