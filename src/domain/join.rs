//! Sparse-slot search and the node-joining primitive.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, instrument};

use crate::domain::error::{GraphError, GraphResult};
use crate::domain::store::{Degree3Graph, NodeKey};

impl<K: NodeKey> Degree3Graph<K> {
    /// Nearest node (breadth-first from `root`) with at least one empty slot.
    ///
    /// `root` itself wins if it has room. Fails with `NotFound` if `root` is absent and
    /// with `Structural` if nothing reachable has a free slot.
    #[instrument(level = "trace", skip(self))]
    pub fn find_sparse_node(&self, root: &K) -> GraphResult<K> {
        let slots = self.slots(root)?;
        if Self::first_empty_slot(slots).is_some() {
            return Ok(root.clone());
        }

        let mut visited = HashSet::from([root.clone()]);
        let mut queue = VecDeque::from([root.clone()]);

        while let Some(current) = queue.pop_front() {
            let Ok(slots) = self.slots(&current) else {
                continue;
            };
            if Self::first_empty_slot(slots).is_some() {
                return Ok(current);
            }
            for neighbor in slots.iter().flatten() {
                if visited.insert(neighbor.clone()) {
                    queue.push_back(neighbor.clone());
                }
            }
        }

        Err(GraphError::structural(format!(
            "no free slot reachable from {:?}: component is not a tree",
            root
        )))
    }

    /// Connect the components of `a` and `b` through a sparse node on each side.
    ///
    /// Returns the two nodes that were actually linked, which need not be `a` and `b`.
    #[instrument(level = "debug", skip(self))]
    pub fn join_nodes(&mut self, a: &K, b: &K) -> GraphResult<(K, K)> {
        if !self.exists(a) {
            return Err(GraphError::not_found(a));
        }
        if !self.exists(b) {
            return Err(GraphError::not_found(b));
        }

        let sparse_a = self.find_sparse_node(a)?;
        let sparse_b = self.find_sparse_node(b)?;
        if sparse_a == sparse_b {
            return Err(GraphError::structural(format!(
                "cannot join {:?} to itself",
                sparse_a
            )));
        }

        let index_a = self.free_slot_of(&sparse_a)?;
        let index_b = self.free_slot_of(&sparse_b)?;
        self.set_slot(&sparse_a, index_a, Some(sparse_b.clone()))?;
        self.set_slot(&sparse_b, index_b, Some(sparse_a.clone()))?;

        debug!("joined {:?} <-> {:?}", sparse_a, sparse_b);
        Ok((sparse_a, sparse_b))
    }

    fn free_slot_of(&self, key: &K) -> GraphResult<usize> {
        Self::first_empty_slot(self.slots(key)?)
            .ok_or_else(|| GraphError::structural(format!("{:?} has no free slot", key)))
    }
}
