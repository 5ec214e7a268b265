//! Rank assignment for layered (Sugiyama-style) graph drawing.
//!
//! Every node of a directed acyclic graph gets an integer rank so each edge spans at least its
//! `minlen`, minimizing the weighted sum of edge spans. The default ranker is the network simplex
//! method of Gansner et al.; see [`rank`] for the alternatives.

pub use strata_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod model;
pub mod rank;
pub mod util;

pub use error::{Error, Result};
pub use model::{EdgeLabel, GraphLabel, NodeLabel, Ranker};
