//! Graph container APIs used by `strata`.
//!
//! The container stores nodes and edges in insertion order and identifies them by string ids.
//! Index-based accessors (`*_ix`) are exposed for hot loops; indices stay valid until the next
//! node or edge removal.

pub mod graph;

pub use graph::{EdgeKey, Graph, GraphOptions, alg};
