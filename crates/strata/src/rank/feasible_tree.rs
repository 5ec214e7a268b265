//! Feasible tree construction used by the network simplex ranker.

use super::tree::{Tree, TreeNodeLabel};
use super::util::{checked_rank, minlen_of};
use crate::graphlib::{Graph, GraphOptions};
use crate::{EdgeLabel, Error, GraphLabel, NodeLabel, Result};
use tracing::trace;

/// Builds a spanning tree of tight edges (slack 0), shifting ranks as needed.
///
/// The tree grows from the first node over tight edges. While it does not span `g`, the
/// minimum-slack edge with exactly one endpoint in the tree is made tight by shifting every tree
/// node's rank, which keeps all tree edges tight and all ranks feasible. `g` must be connected and
/// ranked (e.g. by [`super::util::longest_path`]); a disconnected graph fails with
/// [`Error::DisconnectedTree`].
pub fn feasible_tree(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<Tree> {
    let size = g.node_count();
    let mut rank_by_ix: Vec<i64> = Vec::with_capacity(size);
    g.for_each_node_ix(|_ix, _id, lbl| rank_by_ix.push(lbl.rank.map_or(0, i64::from)));
    let mut in_tree_by_ix: Vec<bool> = vec![false; size];
    let mut tree_g_ixs: Vec<usize> = Vec::new();

    let mut t: Tree = Graph::new(GraphOptions {
        directed: false,
        ..Default::default()
    });

    let Some(start) = g.node_id_by_ix(0).map(str::to_string) else {
        return Ok(t);
    };
    t.set_node(start, TreeNodeLabel::default());
    in_tree_by_ix[0] = true;
    tree_g_ixs.push(0);

    while tight_tree(&mut t, g, &rank_by_ix, &mut in_tree_by_ix, &mut tree_g_ixs) < size {
        let Some((slack, in_v)) = find_min_slack_edge(g, &rank_by_ix, &in_tree_by_ix) else {
            return Err(Error::DisconnectedTree {
                reached: t.node_count(),
                expected: size,
            });
        };
        let delta = if in_v { slack } else { -slack };
        trace!(
            slack,
            delta,
            tree_nodes = t.node_count(),
            "shifting tree ranks"
        );
        shift_ranks(g, &mut rank_by_ix, &tree_g_ixs, delta)?;
    }

    Ok(t)
}

/// Extends `t` with every node reachable over tight edges and returns the tree size.
fn tight_tree(
    t: &mut Tree,
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    rank_by_ix: &[i64],
    in_tree_by_ix: &mut [bool],
    tree_g_ixs: &mut Vec<usize>,
) -> usize {
    let mut stack_ix: Vec<usize> = tree_g_ixs.clone();
    while let Some(v_ix) = stack_ix.pop() {
        let Some(v) = g.node_id_by_ix(v_ix) else {
            continue;
        };

        let mut visit = |tail_ix: usize, head_ix: usize, other_ix: usize, lbl: &EdgeLabel| {
            if in_tree_by_ix[other_ix] {
                return;
            }
            if rank_by_ix[head_ix] - rank_by_ix[tail_ix] - minlen_of(lbl) != 0 {
                return;
            }
            let Some(w) = g.node_id_by_ix(other_ix) else {
                return;
            };
            stack_ix.push(other_ix);
            in_tree_by_ix[other_ix] = true;
            tree_g_ixs.push(other_ix);
            t.set_edge(v, w);
        };

        g.for_each_out_edge_ix(v_ix, None, |tail_ix, head_ix, _ek, lbl| {
            visit(tail_ix, head_ix, head_ix, lbl);
        });
        g.for_each_in_edge_ix(v_ix, None, |tail_ix, head_ix, _ek, lbl| {
            visit(tail_ix, head_ix, tail_ix, lbl);
        });
    }
    t.node_count()
}

/// The smallest slack among edges with exactly one endpoint in the tree, and whether that
/// endpoint is the edge's tail. Ties keep the first edge in insertion order.
fn find_min_slack_edge(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    rank_by_ix: &[i64],
    in_tree_by_ix: &[bool],
) -> Option<(i64, bool)> {
    let mut best: Option<(i64, bool)> = None;
    g.for_each_edge_ix(|v_ix, w_ix, _key, lbl| {
        let in_v = in_tree_by_ix[v_ix];
        if in_v == in_tree_by_ix[w_ix] {
            return;
        }

        let slack = rank_by_ix[w_ix] - rank_by_ix[v_ix] - minlen_of(lbl);
        match &best {
            Some((best_slack, _)) if slack >= *best_slack => {}
            _ => best = Some((slack, in_v)),
        }
    });
    best
}

fn shift_ranks(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    rank_by_ix: &mut [i64],
    tree_g_ixs: &[usize],
    delta: i64,
) -> Result<()> {
    for &ix in tree_g_ixs {
        rank_by_ix[ix] += delta;
        let v = g.node_id_by_ix(ix).unwrap_or_default();
        let rank = checked_rank(v, rank_by_ix[ix])?;
        if let Some(label) = g.node_label_mut_by_ix(ix) {
            label.rank = Some(rank);
        }
    }
    Ok(())
}
