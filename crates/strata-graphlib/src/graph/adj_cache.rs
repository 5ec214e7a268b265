//! Adjacency cache used by [`Graph`](super::Graph).
//!
//! Rankers query incident edges of a node over and over; scanning every edge per query is O(E).
//! The cache is rebuilt lazily after any structural mutation.

use super::entries::EdgeEntry;

#[derive(Debug, Clone)]
pub(in crate::graph) struct AdjCache {
    pub(in crate::graph) generation: u64,
    out: Vec<Vec<usize>>,
    in_: Vec<Vec<usize>>,
}

impl AdjCache {
    /// Directed graphs split edges into out/in lists. Undirected graphs put every incident edge in
    /// both lists, in edge insertion order.
    pub(in crate::graph) fn build<E>(
        generation: u64,
        node_count: usize,
        edges: &[EdgeEntry<E>],
        directed: bool,
    ) -> Self {
        let mut out: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut in_: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for (edge_ix, e) in edges.iter().enumerate() {
            if directed {
                out[e.v_ix].push(edge_ix);
                in_[e.w_ix].push(edge_ix);
                continue;
            }
            out[e.v_ix].push(edge_ix);
            if e.w_ix != e.v_ix {
                out[e.w_ix].push(edge_ix);
            }
        }
        if !directed {
            in_.clone_from(&out);
        }
        Self {
            generation,
            out,
            in_,
        }
    }

    pub(in crate::graph) fn out_edges(&self, v_ix: usize) -> &[usize] {
        self.out.get(v_ix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(in crate::graph) fn in_edges(&self, v_ix: usize) -> &[usize] {
        self.in_.get(v_ix).map(Vec::as_slice).unwrap_or(&[])
    }
}
