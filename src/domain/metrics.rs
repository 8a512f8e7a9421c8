//! Subtree depth and node-count queries.
//!
//! Both queries walk away from an exclusion context: the `visited` set passed in by
//! the caller, typically seeded with the logical parent of `root`. Results are
//! memoized in a [`SubtreeCache`] keyed by metric, node and the neighbor the walk
//! entered it through.
//!
//! The cache is only consulted for parent-only contexts: `visited` empty, or holding
//! exactly the one neighbor of `root` the walk is entered from. In a tree such a
//! context fixes the subtree completely, so one cache can serve any number of them.
//! Any other context is measured without reading or writing the cache. A value cut
//! short by the visited guard (only possible off a tree) is never stored.

use std::collections::{HashMap, HashSet};

use tracing::{instrument, trace};

use crate::domain::error::GraphResult;
use crate::domain::store::{Degree3Graph, NodeKey};

/// Which quantity a query measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Longest path in nodes.
    Depth,
    /// Number of nodes.
    Count,
}

impl Metric {
    fn combine(self, acc: usize, value: usize) -> usize {
        match self {
            Metric::Depth => acc.max(value),
            Metric::Count => acc + value,
        }
    }
}

/// Memo for subtree metrics. Entries are `(metric, node, entered-from) → value`,
/// so depth and count values never mix.
#[derive(Debug, Clone)]
pub struct SubtreeCache<K: NodeKey> {
    entries: HashMap<(Metric, K, Option<K>), usize>,
}

impl<K: NodeKey> Default for SubtreeCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> SubtreeCache<K> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Cached `metric` for `node` reached from `from`, if any.
    pub fn get(&self, metric: Metric, node: &K, from: Option<&K>) -> Option<usize> {
        self.entries
            .get(&(metric, node.clone(), from.cloned()))
            .copied()
    }

    fn store(&mut self, metric: Metric, node: &K, from: Option<&K>, value: usize) {
        self.entries
            .insert((metric, node.clone(), from.cloned()), value);
    }
}

/// A measured value and whether the visited guard left it untouched.
struct Measured {
    value: usize,
    complete: bool,
}

impl<K: NodeKey> Degree3Graph<K> {
    /// Longest path (in nodes) from `root` away from the exclusion context.
    ///
    /// Returns `NotFound` if `root` is absent and 0 if `root` is already in `visited`.
    /// Neighbors that are missing from the store are skipped.
    #[instrument(level = "trace", skip(self, visited, cache))]
    pub fn depth(
        &self,
        root: &K,
        visited: &mut HashSet<K>,
        cache: &mut SubtreeCache<K>,
    ) -> GraphResult<usize> {
        self.measure_from(Metric::Depth, root, visited, cache)
    }

    /// Number of nodes reachable from `root` away from the exclusion context,
    /// `root` included. Same failure and skip rules as [`Degree3Graph::depth`].
    #[instrument(level = "trace", skip(self, visited, cache))]
    pub fn count(
        &self,
        root: &K,
        visited: &mut HashSet<K>,
        cache: &mut SubtreeCache<K>,
    ) -> GraphResult<usize> {
        self.measure_from(Metric::Count, root, visited, cache)
    }

    /// Size of the whole component containing `root`.
    pub fn component_size(&self, root: &K) -> GraphResult<usize> {
        self.count(root, &mut HashSet::new(), &mut SubtreeCache::new())
    }

    /// Subtree size of `child` with `parent` as the only exclusion.
    pub(crate) fn subtree_count(
        &self,
        child: &K,
        parent: &K,
        cache: &mut SubtreeCache<K>,
    ) -> GraphResult<usize> {
        let mut visited = HashSet::from([parent.clone()]);
        self.count(child, &mut visited, cache)
    }

    /// Subtree depth of `child` with `parent` as the only exclusion.
    pub(crate) fn subtree_depth(
        &self,
        child: &K,
        parent: &K,
        cache: &mut SubtreeCache<K>,
    ) -> GraphResult<usize> {
        let mut visited = HashSet::from([parent.clone()]);
        self.depth(child, &mut visited, cache)
    }

    fn measure_from(
        &self,
        metric: Metric,
        root: &K,
        visited: &mut HashSet<K>,
        cache: &mut SubtreeCache<K>,
    ) -> GraphResult<usize> {
        // the first occupied neighbor of `root` already excluded by the caller
        let from = self
            .slots(root)?
            .iter()
            .flatten()
            .find(|neighbor| visited.contains(*neighbor))
            .cloned();
        let shared = visited.iter().all(|v| Some(v) == from.as_ref());
        if !shared {
            trace!("{:?}: exclusion context is not parent-only, cache bypassed", root);
        }

        let measured = self.measure(metric, root, from.as_ref(), visited, cache, shared)?;
        Ok(measured.value)
    }

    fn measure(
        &self,
        metric: Metric,
        node: &K,
        from: Option<&K>,
        visited: &mut HashSet<K>,
        cache: &mut SubtreeCache<K>,
        shared: bool,
    ) -> GraphResult<Measured> {
        let slots = self.slots(node)?;
        if shared {
            if let Some(value) = cache.get(metric, node, from) {
                return Ok(Measured {
                    value,
                    complete: true,
                });
            }
        }
        if !visited.insert(node.clone()) {
            return Ok(Measured {
                value: 0,
                complete: false,
            });
        }

        let mut acc = 0;
        let mut complete = true;
        for neighbor in slots.iter().flatten() {
            if Some(neighbor) == from {
                continue;
            }
            match self.measure(metric, neighbor, Some(node), visited, cache, shared) {
                Ok(child) => {
                    acc = metric.combine(acc, child.value);
                    complete &= child.complete;
                }
                Err(e) if e.is_not_found() => {
                    trace!("skipping dangling neighbor {:?} of {:?}", neighbor, node);
                }
                Err(e) => return Err(e),
            }
        }

        let value = 1 + acc;
        if shared && complete {
            cache.store(metric, node, from, value);
        }
        Ok(Measured { value, complete })
    }
}
