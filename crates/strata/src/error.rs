use crate::graphlib::EdgeKey;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph contains a cycle through: {}", .nodes.join(", "))]
    Cycle { nodes: Vec<String> },
    #[error("edge {v} -> {w} has invalid weight {weight} (expected a finite, non-negative number)")]
    InvalidWeight { v: String, w: String, weight: f64 },
    #[error("edge {v} -> {w} has minlen {minlen}, which does not fit a rank")]
    InvalidMinlen { v: String, w: String, minlen: usize },
    #[error("rank of node {node} overflows")]
    RankOverflow { node: String },
    #[error("tree edge {v} -- {w} has no matching graph edge")]
    MissingTreeEdge { v: String, w: String },
    #[error("no non-tree edge can replace tree edge {v} -> {w}")]
    NoEnterEdge { v: String, w: String },
    #[error("feasible tree spans {reached} of {expected} nodes; the graph is not connected")]
    DisconnectedTree { reached: usize, expected: usize },
    #[error("invalid ranking configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn missing_tree_edge(v: &str, w: &str) -> Self {
        Self::MissingTreeEdge {
            v: v.to_string(),
            w: w.to_string(),
        }
    }

    pub(crate) fn rank_overflow(node: &str) -> Self {
        Self::RankOverflow {
            node: node.to_string(),
        }
    }

    pub(crate) fn no_enter_edge(e: &EdgeKey) -> Self {
        Self::NoEnterEdge {
            v: e.v.clone(),
            w: e.w.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
