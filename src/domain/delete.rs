//! Node deletion with reattachment of orphaned subtrees.

use tracing::{debug, instrument, warn};

use crate::domain::error::{GraphError, GraphResult};
use crate::domain::store::{Degree3Graph, NodeKey};

impl<K: NodeKey> Degree3Graph<K> {
    /// Remove `key` and reconnect what it held together.
    ///
    /// Every neighbor loses its back-reference to `key` and becomes an orphan root. With
    /// two or more orphans, the first (slot order) is dominant: every other orphan is
    /// joined to the centroid of the dominant subtree.
    ///
    /// Returns the mutated keys in first-touch order, never `key` itself. A neighbor
    /// without a back-reference is still an orphan but is only reported if a later
    /// join writes to it. Deleting from an empty store or deleting an absent key is a
    /// no-op. A failing reattachment means the store was not a tree before the call and
    /// is reported as `Corrupted`.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&mut self, key: &K) -> GraphResult<Vec<K>> {
        let Some(slots) = self.nodes.remove(key) else {
            return Ok(Vec::new());
        };

        let mut mutated: Vec<K> = Vec::new();
        let mut orphans: Vec<K> = Vec::new();
        for neighbor in slots.into_iter().flatten() {
            match self.nodes.get_mut(&neighbor) {
                Some(back) => {
                    let mut cleared = false;
                    for slot in back.iter_mut() {
                        if slot.as_ref() == Some(key) {
                            *slot = None;
                            cleared = true;
                        }
                    }
                    if !cleared {
                        warn!("{:?} held no back-reference to deleted {:?}", neighbor, key);
                    } else if !mutated.contains(&neighbor) {
                        mutated.push(neighbor.clone());
                    }
                    orphans.push(neighbor);
                }
                None => warn!("deleted {:?} pointed at missing {:?}", key, neighbor),
            }
        }

        let Some((dominant, subordinates)) = orphans.split_first() else {
            return Ok(mutated);
        };
        if subordinates.is_empty() {
            return Ok(mutated);
        }

        let centroid = self
            .find_centroid(dominant)
            .map_err(|e| GraphError::corrupted(format!("centroid of {:?}", dominant), e))?;
        debug!("reattaching {} orphan(s) to centroid {:?}", subordinates.len(), centroid);

        for orphan in subordinates {
            let (a, b) = self.join_nodes(&centroid, orphan).map_err(|e| {
                GraphError::corrupted(format!("join {:?} to {:?}", orphan, centroid), e)
            })?;
            for touched in [a, b] {
                if !mutated.contains(&touched) {
                    mutated.push(touched);
                }
            }
        }

        Ok(mutated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_leaf_when_deleting_then_only_parent_mutated() {
        let mut graph = Degree3Graph::new();
        graph.insert_isolated("a");
        graph.attach(&"a", "b").unwrap();

        assert_eq!(graph.delete_node(&"b"), Ok(vec!["a"]));
        assert_eq!(graph.slots(&"a").unwrap(), &[None, None, None]);
        assert!(!graph.exists(&"b"));
    }

    #[test]
    fn given_one_way_reference_when_deleting_then_untouched_neighbor_not_reported() {
        // a points at b, b does not point back
        let mut graph = Degree3Graph::new();
        graph.insert_isolated("a");
        graph.insert_isolated("b");
        graph.set_slot(&"a", 0, Some("b")).unwrap();

        assert_eq!(graph.delete_node(&"a"), Ok(vec![]));
        assert_eq!(graph.slots(&"b").unwrap(), &[None, None, None]);
    }

    #[test]
    fn given_absent_key_when_deleting_then_noop() {
        let mut graph: Degree3Graph<&str> = Degree3Graph::new();
        assert_eq!(graph.delete_node(&"a"), Ok(vec![]));
        graph.insert_isolated("a");
        assert_eq!(graph.delete_node(&"b"), Ok(vec![]));
        assert_eq!(graph.len(), 1);
    }
}
