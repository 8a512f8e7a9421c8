//! Rendering a component as an indented text tree.

use std::collections::HashSet;
use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::domain::error::GraphResult;
use crate::domain::store::{Degree3Graph, NodeKey};

impl<K: NodeKey + Display> Degree3Graph<K> {
    /// The component reachable from `root`, hung from `root`, children in slot order.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, root: &K) -> GraphResult<Tree<String>> {
        // fail the same way a traversal does
        self.depth_first(root)?;

        let mut visited = HashSet::from([root.clone()]);
        Ok(self.build_tree(root, &mut visited))
    }

    fn build_tree(&self, node: &K, visited: &mut HashSet<K>) -> Tree<String> {
        let mut tree = Tree::new(node.to_string());
        let Ok(neighbors) = self.neighbors(node) else {
            return tree;
        };
        for neighbor in neighbors {
            if visited.insert(neighbor.clone()) && self.exists(&neighbor) {
                let child = self.build_tree(&neighbor, visited);
                tree.push(child);
            }
        }
        tree
    }
}
