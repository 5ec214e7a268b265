//! Rank helpers (longest-path, slack).

use crate::graphlib::{EdgeKey, Graph, alg};
use crate::{EdgeLabel, Error, GraphLabel, NodeLabel, Result};

/// Ranks every node as low as its out-edges allow: sinks get 0 and every other node gets
/// `min(rank(w) - minlen)` over its out-edges `v -> w`. Ranks are usually negative afterwards.
///
/// Nodes are processed sinks first, so deep graphs need no recursion. A graph that still has
/// unprocessed nodes at the end contains a cycle. Ranks that do not fit `i32` fail with
/// [`Error::RankOverflow`]; on any error no rank is written.
pub fn longest_path(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    let n = g.node_count();
    let mut pending_out: Vec<usize> = (0..n).map(|ix| g.out_degree_ix(ix)).collect();
    let mut rank_by_ix: Vec<Option<i64>> = vec![None; n];
    let mut ready: Vec<usize> = (0..n).filter(|&ix| pending_out[ix] == 0).collect();
    let mut done: usize = 0;

    while let Some(w_ix) = ready.pop() {
        done += 1;
        let w_rank = *rank_by_ix[w_ix].get_or_insert(0);
        g.for_each_in_edge_ix(w_ix, None, |v_ix, _, _, lbl| {
            let candidate = w_rank.saturating_sub(minlen_of(lbl));
            let slot = &mut rank_by_ix[v_ix];
            *slot = Some(slot.map_or(candidate, |r| r.min(candidate)));
            pending_out[v_ix] -= 1;
            if pending_out[v_ix] == 0 {
                ready.push(v_ix);
            }
        });
    }

    if done < n {
        let nodes = alg::find_cycles(g).into_iter().next().unwrap_or_default();
        return Err(Error::Cycle { nodes });
    }

    let mut ranks: Vec<Option<i32>> = Vec::with_capacity(n);
    for (ix, rank) in rank_by_ix.into_iter().enumerate() {
        let v = g.node_id_by_ix(ix).unwrap_or_default();
        ranks.push(rank.map(|r| checked_rank(v, r)).transpose()?);
    }
    for (ix, rank) in ranks.into_iter().enumerate() {
        if let Some(lbl) = g.node_label_mut_by_ix(ix) {
            lbl.rank = rank;
        }
    }
    Ok(())
}

/// `rank(w) - rank(v) - minlen` for edge `e`. Zero means the edge is tight.
pub fn slack(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, e: &EdgeKey) -> i64 {
    // Missing nodes or ranks count as rank 0.
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let minlen = g.edge_by_key(e).map_or(1, minlen_of);
    i64::from(w_rank) - i64::from(v_rank) - minlen
}

/// Edge `minlen` widened for rank arithmetic, which runs in `i64` and is narrowed on store.
pub(crate) fn minlen_of(lbl: &EdgeLabel) -> i64 {
    i64::try_from(lbl.minlen).unwrap_or(i64::MAX)
}

/// Narrows a rank computed for node `v` back to `i32`.
pub(crate) fn checked_rank(v: &str, rank: i64) -> Result<i32> {
    i32::try_from(rank).map_err(|_| Error::rank_overflow(v))
}
