//! Network simplex ranker.
//!
//! The classic pivot loop: start from a feasible tight spanning tree, number it, compute cut
//! values, then repeatedly swap a tree edge with a negative cut value for the non-tree edge of
//! minimum slack that reconnects the tree. Ranks are optimal once no cut value is negative.

use super::WorkingGraph;
use super::feasible_tree::feasible_tree;
use super::tree::Tree;
use crate::graphlib::{Graph, alg};
use crate::{EdgeLabel, Error, GraphLabel, NodeLabel, Result};
use tracing::{debug, trace};

mod edges;

pub use edges::{enter_edge, exchange_edges, leave_edge, update_ranks};

/// Ranks `g` so the weighted sum of edge spans is minimal, with the smallest rank at 0.
///
/// Disconnected graphs are ranked as a whole: every component is tied to a temporary root that
/// never appears in `g`. Running this twice on the same graph yields the same ranks.
pub fn network_simplex(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    let mut work = WorkingGraph::prepare(g)?;
    optimize(&mut work.graph)?;
    work.finish(g)
}

/// Runs the pivot loop on a connected, longest-path ranked graph and returns the final tree.
fn optimize(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<Tree> {
    let mut t = feasible_tree(g)?;
    init_low_lim_values(&mut t, None);
    init_cut_values(&mut t, g)?;

    let mut iterations: usize = 0;
    while let Some(e) = leave_edge(&t) {
        let f = enter_edge(&t, g, &e)?;
        trace!(
            leave = %e,
            enter = %f,
            cutvalue = t.edge_by_key(&e).map(|lbl| lbl.cutvalue),
            "pivot"
        );
        exchange_edges(&mut t, g, &e, &f)?;
        iterations += 1;
    }

    debug!(
        iterations,
        tree_edges = t.edge_count(),
        "network simplex converged"
    );
    Ok(t)
}

/// Numbers `tree` by a depth-first walk from `root` (default: the first tree node).
///
/// Each node gets `lim`, its post-order number counting from 1, `low`, the smallest `lim` in its
/// subtree, and `parent`, which is `None` only for the root. Afterwards `u` is a descendant of `v`
/// exactly when `v.low <= u.lim <= v.lim`. A `root` that is not in the tree leaves it unnumbered.
pub fn init_low_lim_values(tree: &mut Tree, root: Option<&str>) {
    let root_ix = match root {
        Some(id) => tree.node_ix(id),
        None => (tree.node_count() > 0).then_some(0),
    };
    let Some(root_ix) = root_ix else {
        return;
    };

    struct Frame {
        v_ix: usize,
        parent_ix: Option<usize>,
        low: i32,
        children: Vec<usize>,
        next_child: usize,
    }

    fn push_frame(
        tree: &Tree,
        visited: &mut [bool],
        stack: &mut Vec<Frame>,
        v_ix: usize,
        parent_ix: Option<usize>,
        low: i32,
    ) {
        visited[v_ix] = true;
        let mut children: Vec<usize> = Vec::new();
        tree.for_each_neighbor_ix(v_ix, |w_ix| {
            if parent_ix != Some(w_ix) {
                children.push(w_ix);
            }
        });
        stack.push(Frame {
            v_ix,
            parent_ix,
            low,
            children,
            next_child: 0,
        });
    }

    let mut visited: Vec<bool> = vec![false; tree.node_count()];
    let mut stack: Vec<Frame> = Vec::new();
    let mut next_lim: i32 = 1;
    push_frame(tree, &mut visited, &mut stack, root_ix, None, next_lim);

    while let Some(top) = stack.last_mut() {
        if let Some(&w_ix) = top.children.get(top.next_child) {
            top.next_child += 1;
            let v_ix = top.v_ix;
            if !visited[w_ix] {
                push_frame(tree, &mut visited, &mut stack, w_ix, Some(v_ix), next_lim);
            }
            continue;
        }

        let Some(Frame {
            v_ix,
            parent_ix,
            low,
            ..
        }) = stack.pop()
        else {
            break;
        };
        let parent = parent_ix
            .and_then(|p| tree.node_id_by_ix(p))
            .map(str::to_string);
        if let Some(label) = tree.node_label_mut_by_ix(v_ix) {
            label.low = low;
            label.lim = next_lim;
            label.parent = parent;
        }
        next_lim += 1;
    }
}

/// Computes the cut value of every tree edge, visiting children before their parents.
///
/// `t` must already be numbered by [`init_low_lim_values`].
pub fn init_cut_values(t: &mut Tree, g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    let Some(root) = t
        .nodes()
        .find(|v| t.node(v).is_some_and(|lbl| lbl.parent.is_none()))
        .map(str::to_string)
    else {
        return Ok(());
    };

    for v in alg::postorder(t, &[root.as_str()]) {
        if v != root {
            assign_cut_value(t, g, &v)?;
        }
    }
    Ok(())
}

fn assign_cut_value(
    t: &mut Tree,
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    child: &str,
) -> Result<()> {
    let Some(parent) = t.node(child).and_then(|lbl| lbl.parent.clone()) else {
        return Ok(());
    };
    let cutvalue = calc_cut_value(t, g, child)?;
    if let Some(lbl) = t.edge_mut(child, &parent, None) {
        lbl.cutvalue = cutvalue;
    }
    Ok(())
}

/// Cut value of the tree edge between `child` and its parent.
///
/// Removing that edge splits the tree into the child's subtree and the rest. The cut value is the
/// total weight of graph edges crossing from the tail component to the head component, minus the
/// weight crossing back, where tail and head follow the graph edge's direction. Cut values already
/// assigned to the child's own tree edges are folded in, so only the child's incident edges are
/// visited. Nodes without a parent have cut value 0.
pub fn calc_cut_value(
    t: &Tree,
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    child: &str,
) -> Result<f64> {
    let Some(parent) = t.node(child).and_then(|lbl| lbl.parent.as_deref()) else {
        return Ok(0.0);
    };
    let (Some(child_ix), Some(parent_ix)) = (g.node_ix(child), g.node_ix(parent)) else {
        return Err(Error::missing_tree_edge(child, parent));
    };

    let (graph_edge, child_is_tail) = match g.edge_by_endpoints_ix(child_ix, parent_ix) {
        Some(e) => (e, true),
        None => match g.edge_by_endpoints_ix(parent_ix, child_ix) {
            Some(e) => (e, false),
            None => return Err(Error::missing_tree_edge(child, parent)),
        },
    };

    let mut cut_value = graph_edge.weight;
    let mut fold = |other_ix: usize, weight: f64, points_to_head: bool| {
        cut_value += if points_to_head { weight } else { -weight };

        let Some(other) = g.node_id_by_ix(other_ix) else {
            return;
        };
        if let Some(other_edge) = t.edge(child, other, None) {
            cut_value += if points_to_head {
                -other_edge.cutvalue
            } else {
                other_edge.cutvalue
            };
        }
    };

    g.for_each_out_edge_ix(child_ix, None, |_tail_ix, head_ix, _ek, lbl| {
        if head_ix != parent_ix {
            fold(head_ix, lbl.weight, child_is_tail);
        }
    });
    g.for_each_in_edge_ix(child_ix, None, |tail_ix, _head_ix, _ek, lbl| {
        if tail_ix != parent_ix {
            fold(tail_ix, lbl.weight, !child_is_tail);
        }
    });

    Ok(cut_value)
}
