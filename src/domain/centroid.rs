//! Centroid search.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::error::{GraphError, GraphResult};
use crate::domain::metrics::SubtreeCache;
use crate::domain::store::{Degree3Graph, NodeKey};

impl<K: NodeKey> Degree3Graph<K> {
    /// Node of the component containing `root` at which no neighboring subtree, away
    /// from the path already walked, holds more than half of the component.
    ///
    /// Any missing node along the way, or a walk that comes back on itself, is
    /// reported as `Structural`.
    #[instrument(level = "debug", skip(self))]
    pub fn find_centroid(&self, root: &K) -> GraphResult<K> {
        let total = self.component_size(root).map_err(|e| {
            GraphError::structural(format!("cannot size component of {:?}: {}", root, e))
        })?;
        let half = total / 2;

        let mut current = root.clone();
        let mut parent: Option<K> = None;
        let mut path = HashSet::from([root.clone()]);

        'descend: loop {
            let slots = self
                .slots(&current)
                .map_err(|_| GraphError::structural(format!("{:?} vanished", current)))?
                .clone();

            for neighbor in slots.iter().flatten() {
                if Some(neighbor) == parent.as_ref() {
                    continue;
                }
                let size = self
                    .subtree_count(neighbor, &current, &mut SubtreeCache::new())
                    .map_err(|e| {
                        GraphError::structural(format!(
                            "cannot size subtree {:?}: {}",
                            neighbor, e
                        ))
                    })?;
                if size > half {
                    if !path.insert(neighbor.clone()) {
                        return Err(GraphError::structural(format!(
                            "centroid search returned to {:?}: not a tree",
                            neighbor
                        )));
                    }
                    debug!("centroid: {:?} -> {:?} ({} > {})", current, neighbor, size, half);
                    parent = Some(std::mem::replace(&mut current, neighbor.clone()));
                    continue 'descend;
                }
            }

            return Ok(current);
        }
    }
}
