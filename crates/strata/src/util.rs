//! Graph helpers shared by the rankers.

use crate::graphlib::{Graph, GraphOptions};
use crate::rank::util::checked_rank;
use crate::{EdgeLabel, NodeLabel, Result};
use rustc_hash::FxHashMap as HashMap;

/// Collapses parallel edges into one edge per `(v, w)` pair: weights add up and the largest
/// `minlen` wins. Self-loops are dropped. Merged edges keep the position of their first
/// occurrence, and nodes keep their labels and insertion order.
pub fn simplify<N, G>(g: &Graph<N, EdgeLabel, G>) -> Graph<N, EdgeLabel, G>
where
    N: Default + Clone + 'static,
    G: Default + Clone,
{
    let mut simplified: Graph<N, EdgeLabel, G> = Graph::new(GraphOptions {
        multigraph: false,
        ..Default::default()
    });
    simplified.set_graph(g.graph().clone());

    g.for_each_node(|v, lbl| {
        simplified.set_node(v, lbl.clone());
    });

    let mut slots: HashMap<(&str, &str), usize> = HashMap::default();
    let mut merged: Vec<(&str, &str, EdgeLabel)> = Vec::new();
    for e in g.edges() {
        if e.v == e.w {
            continue;
        }
        let Some(lbl) = g.edge_by_key(e) else {
            continue;
        };
        let slot = *slots
            .entry((e.v.as_str(), e.w.as_str()))
            .or_insert_with(|| {
                merged.push((
                    e.v.as_str(),
                    e.w.as_str(),
                    EdgeLabel {
                        minlen: 0,
                        weight: 0.0,
                    },
                ));
                merged.len() - 1
            });
        let entry = &mut merged[slot].2;
        entry.weight += lbl.weight;
        entry.minlen = entry.minlen.max(lbl.minlen);
    }

    for (v, w, lbl) in merged {
        simplified.set_edge_with_label(v, w, lbl);
    }

    simplified
}

/// Shifts every assigned rank so the smallest one is 0. Unranked nodes are left alone.
///
/// Fails with [`crate::Error::RankOverflow`] when the ranks span more than `i32::MAX`, in which
/// case no rank is changed.
pub fn normalize_ranks<E, G>(g: &mut Graph<NodeLabel, E, G>) -> Result<()>
where
    E: Default + 'static,
    G: Default,
{
    let min_rank = g
        .nodes()
        .filter_map(|v| g.node(v).and_then(|n| n.rank))
        .min();
    let Some(min_rank) = min_rank else {
        return Ok(());
    };

    let mut shifted: Vec<Option<i32>> = Vec::with_capacity(g.node_count());
    for ix in 0..g.node_count() {
        let v = g.node_id_by_ix(ix).unwrap_or_default();
        let rank = g.node_label_by_ix(ix).and_then(|n| n.rank);
        let shift = |r: i32| checked_rank(v, i64::from(r) - i64::from(min_rank));
        shifted.push(rank.map(shift).transpose()?);
    }

    for (ix, rank) in shifted.into_iter().enumerate() {
        if let (Some(rank), Some(n)) = (rank, g.node_label_mut_by_ix(ix)) {
            n.rank = Some(rank);
        }
    }
    Ok(())
}

/// Generates node ids that do not collide with nodes already in a graph.
///
/// Each generator keeps its own counter, so concurrent rankings never share state.
#[derive(Debug, Clone)]
pub struct IdGen {
    prefix: String,
    next: usize,
}

impl IdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Returns `{prefix}{n}` for the smallest counter value whose id is unused in `g`.
    pub fn next_unused<N, E, G>(&mut self, g: &Graph<N, E, G>) -> String
    where
        N: Default + 'static,
        E: Default + 'static,
        G: Default,
    {
        loop {
            let id = format!("{}{}", self.prefix, self.next);
            self.next += 1;
            if !g.has_node(&id) {
                return id;
            }
        }
    }
}
