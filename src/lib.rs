//! Bounded-degree tree store.
//!
//! Every node holds at most three neighbor references in fixed, ordered slots.
//! Keys are inserted by one of three balancing strategies, deleted with automatic
//! reattachment of the orphaned subtrees, and read back through lazy depth-first,
//! breadth-first and edge-list cursors.
//!
//! ```
//! use degree3::domain::{Degree3Graph, InsertStrategy};
//!
//! let mut graph = Degree3Graph::new();
//! graph.insert(None, "a", InsertStrategy::Balanced).unwrap();
//! for key in ["b", "c", "d", "e"] {
//!     graph.insert(Some(&"a"), key, InsertStrategy::Balanced).unwrap();
//! }
//! assert_eq!(graph.slots(&"b").unwrap(), &[Some("a"), Some("e"), None]);
//!
//! let keys: Vec<_> = graph.depth_first(&"a").unwrap().map(|n| n.key).collect();
//! assert_eq!(keys, ["a", "b", "e", "c", "d"]);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{Degree3Graph, GraphError, GraphResult, InsertStrategy, NodeInfo};
