//! Domain layer: the bounded-degree tree and its algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod centroid;
pub mod delete;
pub mod display;
pub mod error;
pub mod insert;
pub mod join;
pub mod metrics;
pub mod store;
pub mod traverse;

pub use error::{GraphError, GraphResult};
pub use insert::{InsertStrategy, SubtreeDetail};
pub use metrics::{Metric, SubtreeCache};
pub use store::{Degree3Graph, NodeKey, Slots, DEGREE};
pub use traverse::{BreadthFirst, DepthFirst, EdgeList, NodeInfo};
