//! The three insertion strategies.
//!
//! Shared rules:
//! - inserting a key that is already present is a no-op returning no affected keys
//! - an empty store with no root bootstraps the key as the only node
//! - an empty store with a root is a `PreconditionViolation`
//! - a root that is missing from a non-empty store is `NotFound`
//! - no root on a non-empty store starts at an arbitrary existing key
//!
//! On success the affected keys are `[new_key, parent]` (or `[new_key]` on bootstrap).

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::error::{GraphError, GraphResult};
use crate::domain::metrics::SubtreeCache;
use crate::domain::store::{Degree3Graph, NodeKey, DEGREE};

/// Which placement rule an insertion follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertStrategy {
    /// Breadth-first first fit, packing levels like a ternary heap.
    Fill,
    /// Greedy descent into the neighbor with the fewest nodes.
    SmallestSubtree,
    /// Descent into the shallowest neighbor, ties broken by node count.
    #[default]
    Balanced,
}

impl InsertStrategy {
    pub const ALL: [InsertStrategy; 3] = [
        InsertStrategy::Fill,
        InsertStrategy::SmallestSubtree,
        InsertStrategy::Balanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsertStrategy::Fill => "fill",
            InsertStrategy::SmallestSubtree => "smallest-subtree",
            InsertStrategy::Balanced => "balanced",
        }
    }
}

impl fmt::Display for InsertStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsertStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsertStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown strategy '{}', expected one of: fill, smallest-subtree, balanced",
                    s
                )
            })
    }
}

/// A candidate branch ranked during balanced insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtreeDetail<K> {
    pub key: K,
    pub count: usize,
    pub depth: usize,
}

enum Start<K> {
    Done(Vec<K>),
    From(K),
}

impl<K: NodeKey> Degree3Graph<K> {
    /// Insert `key` relative to `root` with the given strategy.
    pub fn insert(
        &mut self,
        root: Option<&K>,
        key: K,
        strategy: InsertStrategy,
    ) -> GraphResult<Vec<K>> {
        match strategy {
            InsertStrategy::Fill => self.insert_fill(root, key),
            InsertStrategy::SmallestSubtree => self.insert_smallest_subtree(root, key),
            InsertStrategy::Balanced => self.insert_balanced(root, key),
        }
    }

    /// Attach `key` to the first breadth-first node that is either the start node with
    /// a free slot or any node with exactly two neighbors. If none qualifies, the first
    /// breadth-first node with any free slot is used.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_fill(&mut self, root: Option<&K>, key: K) -> GraphResult<Vec<K>> {
        let start = match self.begin_insert(root, &key)? {
            Start::Done(affected) => return Ok(affected),
            Start::From(start) => start,
        };

        let mut target = None;
        let mut fallback = None;
        for info in self.breadth_first(&start)? {
            let degree = info.neighbors.len();
            if (info.key == start && degree < DEGREE) || degree == DEGREE - 1 {
                target = Some(info.key);
                break;
            }
            if fallback.is_none() && degree < DEGREE {
                fallback = Some(info.key);
            }
        }

        let parent = target.or(fallback).ok_or_else(|| {
            GraphError::structural(format!("no free slot reachable from {:?}", start))
        })?;
        debug!("fill: attaching {:?} under {:?}", key, parent);
        self.attach(&parent, key)
    }

    /// Walk toward the neighbor with the smallest subtree until a node has room.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_smallest_subtree(&mut self, root: Option<&K>, key: K) -> GraphResult<Vec<K>> {
        let mut current = match self.begin_insert(root, &key)? {
            Start::Done(affected) => return Ok(affected),
            Start::From(start) => start,
        };
        let mut visited = HashSet::new();
        let mut cache = SubtreeCache::new();

        loop {
            visited.insert(current.clone());
            let slots = self.slots(&current)?.clone();
            if Self::first_empty_slot(&slots).is_some() {
                debug!("smallest-subtree: attaching {:?} under {:?}", key, current);
                return self.attach(&current, key);
            }

            let mut smallest: Option<(K, usize)> = None;
            for child in slots.iter().flatten() {
                let size = self.subtree_count(child, &current, &mut cache)?;
                if smallest.as_ref().map_or(true, |(_, best)| size < *best) {
                    smallest = Some((child.clone(), size));
                }
            }

            let (next, size) = smallest.ok_or_else(|| {
                GraphError::structural(format!("{:?} has neither room nor neighbors", current))
            })?;
            if visited.contains(&next) {
                return Err(GraphError::structural(format!(
                    "descent from {:?} returned to {:?}",
                    current, next
                )));
            }
            debug!("smallest-subtree: {:?} -> {:?} (size {})", current, next, size);
            current = next;
        }
    }

    /// Walk toward the shallowest unvisited neighbor (fewest nodes on ties, slot order
    /// after that) until a node has room. Returns no affected keys if a full node has
    /// no unvisited neighbor left.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_balanced(&mut self, root: Option<&K>, key: K) -> GraphResult<Vec<K>> {
        let mut current = match self.begin_insert(root, &key)? {
            Start::Done(affected) => return Ok(affected),
            Start::From(start) => start,
        };
        let mut visited = HashSet::new();
        let mut cache = SubtreeCache::new();

        loop {
            visited.insert(current.clone());
            let slots = self.slots(&current)?.clone();
            if Self::first_empty_slot(&slots).is_some() {
                debug!("balanced: attaching {:?} under {:?}", key, current);
                return self.attach(&current, key);
            }

            let mut details = Vec::with_capacity(DEGREE);
            for child in slots.iter().flatten().filter(|c| !visited.contains(*c)) {
                details.push(SubtreeDetail {
                    key: child.clone(),
                    count: self.subtree_count(child, &current, &mut cache)?,
                    depth: self.subtree_depth(child, &current, &mut cache)?,
                });
            }
            // stable: equal ranks keep slot order
            details.sort_by_key(|detail| (detail.depth, detail.count));

            match details.into_iter().next() {
                Some(best) => {
                    debug!(
                        "balanced: {:?} -> {:?} (depth {}, count {})",
                        current, best.key, best.depth, best.count
                    );
                    current = best.key;
                }
                None => return Ok(Vec::new()),
            }
        }
    }

    fn begin_insert(&mut self, root: Option<&K>, key: &K) -> GraphResult<Start<K>> {
        if self.exists(key) {
            return Ok(Start::Done(Vec::new()));
        }
        if self.is_empty() {
            if let Some(root) = root {
                return Err(GraphError::precondition(format!(
                    "root {:?} given for an empty store",
                    root
                )));
            }
            self.insert_isolated(key.clone());
            return Ok(Start::Done(vec![key.clone()]));
        }
        match root {
            Some(root) if self.exists(root) => Ok(Start::From(root.clone())),
            Some(root) => Err(GraphError::not_found(root)),
            None => self
                .any_key()
                .map(Start::From)
                .ok_or_else(|| GraphError::structural("store has no start node")),
        }
    }
}
