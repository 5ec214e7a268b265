//! Spanning tree labels used by the tree-based rankers.

use crate::graphlib::Graph;

/// Undirected spanning tree over the ranking graph's node ids.
pub type Tree = Graph<TreeNodeLabel, TreeEdgeLabel, ()>;

/// Post-order numbering of a tree node: `lim` is the node's own post-order number and `low` the
/// smallest number in its subtree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNodeLabel {
    pub low: i32,
    pub lim: i32,
    pub parent: Option<String>,
}

impl TreeNodeLabel {
    /// Whether this node lies in the subtree rooted at `ancestor` (a node is its own descendant).
    pub fn is_descendant_of(&self, ancestor: &TreeNodeLabel) -> bool {
        ancestor.low <= self.lim && self.lim <= ancestor.lim
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeEdgeLabel {
    pub cutvalue: f64,
}
