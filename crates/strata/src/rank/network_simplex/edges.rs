//! Pivot steps of the network simplex loop.

use crate::graphlib::{EdgeKey, Graph, alg};
use crate::rank::tree::Tree;
use crate::rank::util::{checked_rank, minlen_of};
use crate::{EdgeLabel, Error, GraphLabel, NodeLabel, Result};

/// The first tree edge, in insertion order, whose cut value is negative.
pub fn leave_edge(t: &Tree) -> Option<EdgeKey> {
    t.edges()
        .find(|e| t.edge_by_key(e).is_some_and(|lbl| lbl.cutvalue < 0.0))
        .cloned()
}

/// Picks the graph edge that replaces tree edge `edge`.
///
/// Removing `edge` splits the tree in two. Candidates are graph edges oriented the same way as
/// `edge` across that split; among them the one with minimum slack wins, the first in graph edge
/// order on ties.
pub fn enter_edge(
    t: &Tree,
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    edge: &EdgeKey,
) -> Result<EdgeKey> {
    let (v, w) = if g.has_edge(&edge.v, &edge.w, None) {
        (edge.v.as_str(), edge.w.as_str())
    } else {
        (edge.w.as_str(), edge.v.as_str())
    };
    let (Some(v_lbl), Some(w_lbl)) = (t.node(v), t.node(w)) else {
        return Err(Error::missing_tree_edge(v, w));
    };

    // The endpoint with the smaller lim roots the subtree that detaches from the tree root.
    // `flip` is set when that subtree holds the graph edge's head rather than its tail.
    let (tail, flip) = if v_lbl.lim > w_lbl.lim {
        (w_lbl, true)
    } else {
        (v_lbl, false)
    };

    let mut lim_by_ix: Vec<Option<i32>> = Vec::with_capacity(g.node_count());
    let mut rank_by_ix: Vec<i64> = Vec::with_capacity(g.node_count());
    g.for_each_node_ix(|_ix, id, lbl| {
        lim_by_ix.push(t.node(id).map(|n| n.lim));
        rank_by_ix.push(lbl.rank.map_or(0, i64::from));
    });
    let is_desc = |ix: usize| lim_by_ix[ix].is_some_and(|lim| tail.low <= lim && lim <= tail.lim);

    let mut best: Option<(i64, EdgeKey)> = None;
    g.for_each_edge_ix(|v_ix, w_ix, key, lbl| {
        if flip != is_desc(v_ix) || flip == is_desc(w_ix) {
            return;
        }
        let slack = rank_by_ix[w_ix] - rank_by_ix[v_ix] - minlen_of(lbl);
        match &best {
            Some((best_slack, _)) if slack >= *best_slack => {}
            _ => best = Some((slack, key.clone())),
        }
    });

    best.map(|(_, e)| e)
        .ok_or_else(|| Error::no_enter_edge(&EdgeKey::new(v, w)))
}

/// Replaces tree edge `e` by graph edge `f`, then renumbers the tree, recomputes every cut value
/// and moves node ranks so all tree edges are tight again.
pub fn exchange_edges(
    t: &mut Tree,
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    e: &EdgeKey,
    f: &EdgeKey,
) -> Result<()> {
    t.remove_edge(&e.v, &e.w, None);
    t.set_edge(f.v.as_str(), f.w.as_str());
    super::init_low_lim_values(t, None);
    super::init_cut_values(t, g)?;
    update_ranks(t, g)
}

/// Walks the tree from its root in pre-order and sets every other node's rank from its parent so
/// the connecting graph edge is tight. The root keeps its rank.
pub fn update_ranks(t: &Tree, g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    let Some(root) = t
        .nodes()
        .find(|v| t.node(v).is_some_and(|lbl| lbl.parent.is_none()))
    else {
        return Ok(());
    };

    for v in alg::preorder(t, &[root]).into_iter().skip(1) {
        let Some(parent) = t.node(&v).and_then(|lbl| lbl.parent.as_deref()) else {
            continue;
        };
        let (Some(v_ix), Some(parent_ix)) = (g.node_ix(&v), g.node_ix(parent)) else {
            return Err(Error::missing_tree_edge(&v, parent));
        };

        let parent_rank = g
            .node_label_by_ix(parent_ix)
            .and_then(|lbl| lbl.rank)
            .map_or(0, i64::from);
        let rank = if let Some(e) = g.edge_by_endpoints_ix(v_ix, parent_ix) {
            parent_rank - minlen_of(e)
        } else if let Some(e) = g.edge_by_endpoints_ix(parent_ix, v_ix) {
            parent_rank + minlen_of(e)
        } else {
            return Err(Error::missing_tree_edge(&v, parent));
        };

        let rank = checked_rank(&v, rank)?;
        if let Some(lbl) = g.node_label_mut_by_ix(v_ix) {
            lbl.rank = Some(rank);
        }
    }
    Ok(())
}
