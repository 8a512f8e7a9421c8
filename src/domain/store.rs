//! Node store: key → three ordered, independently clearable neighbor slots.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::instrument;

use crate::domain::error::{GraphError, GraphResult};

/// Maximum number of neighbors a node can hold.
pub const DEGREE: usize = 3;

/// Neighbor slots of one node. Slot 0 holds the connecting edge of a freshly
/// inserted node; no other slot carries meaning.
pub type Slots<K> = [Option<K>; DEGREE];

/// Bounds every key type has to satisfy.
pub trait NodeKey: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> NodeKey for T {}

/// In-memory tree with at most three neighbors per node.
///
/// Single owner, no internal synchronization. The tree shape is maintained by the
/// insertion and deletion operations; `set_slot` writes are not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degree3Graph<K: NodeKey> {
    pub(crate) nodes: HashMap<K, Slots<K>>,
}

impl<K: NodeKey> Default for Degree3Graph<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> Degree3Graph<K> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn exists(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.nodes.keys()
    }

    /// Slots of `key`, or `NotFound`.
    pub fn slots(&self, key: &K) -> GraphResult<&Slots<K>> {
        self.nodes.get(key).ok_or_else(|| GraphError::not_found(key))
    }

    /// Overwrite one slot. Writing to a missing key or an index beyond `DEGREE` fails.
    #[instrument(level = "trace", skip(self))]
    pub fn set_slot(&mut self, key: &K, index: usize, value: Option<K>) -> GraphResult<()> {
        if index >= DEGREE {
            return Err(GraphError::structural(format!(
                "slot index {} out of range for {:?}",
                index, key
            )));
        }
        let slots = self
            .nodes
            .get_mut(key)
            .ok_or_else(|| GraphError::not_found(key))?;
        slots[index] = value;
        Ok(())
    }

    /// Add `key` with three empty slots, replacing whatever was stored under it.
    pub fn insert_isolated(&mut self, key: K) {
        self.nodes.insert(key, [None, None, None]);
    }

    /// Number of occupied slots.
    pub fn degree(&self, key: &K) -> GraphResult<usize> {
        Ok(self.slots(key)?.iter().flatten().count())
    }

    /// Occupied slot keys in slot order.
    pub fn neighbors(&self, key: &K) -> GraphResult<Vec<K>> {
        Ok(self.slots(key)?.iter().flatten().cloned().collect())
    }

    pub(crate) fn first_empty_slot(slots: &Slots<K>) -> Option<usize> {
        slots.iter().position(Option::is_none)
    }

    /// Connect a brand-new `key` to `parent` through the parent's first empty slot.
    /// The new node's slot 0 points back to `parent`.
    pub(crate) fn attach(&mut self, parent: &K, key: K) -> GraphResult<Vec<K>> {
        let slots = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| GraphError::not_found(parent))?;
        let index = Self::first_empty_slot(slots)
            .ok_or_else(|| GraphError::structural(format!("{:?} has no free slot", parent)))?;
        slots[index] = Some(key.clone());
        self.nodes
            .insert(key.clone(), [Some(parent.clone()), None, None]);
        Ok(vec![key, parent.clone()])
    }

    /// Any key, used as a starting point when the caller names none.
    pub(crate) fn any_key(&self) -> Option<K> {
        self.nodes.keys().next().cloned()
    }
}
