//! Traversal and connectivity helpers.
//!
//! All traversals are iterative so deep graphs cannot overflow the call stack. Neighbor order is
//! the graph's adjacency order, which makes every result deterministic for a given insertion order.

use super::Graph;
use std::collections::VecDeque;

/// Depth-first walk visiting successors in adjacency order. `emit_on_exit` selects post-order.
fn dfs_from_roots<N, E, G>(g: &Graph<N, E, G>, roots: &[&str], emit_on_exit: bool) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut visited: Vec<bool> = vec![false; g.node_count()];
    let mut out: Vec<String> = Vec::with_capacity(g.node_count());
    let mut stack: Vec<(usize, Vec<usize>, usize)> = Vec::new();

    let successors_ix = |v_ix: usize| -> Vec<usize> {
        let mut ws: Vec<usize> = Vec::new();
        g.for_each_out_edge_ix(v_ix, None, |_, w_ix, _, _| ws.push(w_ix));
        ws
    };

    for root in roots {
        let Some(root_ix) = g.node_ix(root) else {
            continue;
        };
        if visited[root_ix] {
            continue;
        }
        visited[root_ix] = true;
        if !emit_on_exit {
            out.push(root.to_string());
        }
        stack.push((root_ix, successors_ix(root_ix), 0));

        while let Some((v_ix, ws, next)) = stack.last_mut() {
            if let Some(&w_ix) = ws.get(*next) {
                *next += 1;
                if visited[w_ix] {
                    continue;
                }
                visited[w_ix] = true;
                if !emit_on_exit {
                    out.extend(g.node_id_by_ix(w_ix).map(str::to_string));
                }
                stack.push((w_ix, successors_ix(w_ix), 0));
                continue;
            }
            let v_ix = *v_ix;
            stack.pop();
            if emit_on_exit {
                out.extend(g.node_id_by_ix(v_ix).map(str::to_string));
            }
        }
    }
    out
}

pub fn preorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    dfs_from_roots(g, roots, false)
}

pub fn postorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    dfs_from_roots(g, roots, true)
}

/// Weakly connected components, each listed in breadth-first order from its first node.
/// Components are ordered by their first node's insertion order.
pub fn components<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut seen: Vec<bool> = vec![false; g.node_count()];
    let mut out: Vec<Vec<String>> = Vec::new();
    let mut q: VecDeque<usize> = VecDeque::new();

    for start_ix in 0..g.node_count() {
        if seen[start_ix] {
            continue;
        }
        seen[start_ix] = true;
        let mut comp: Vec<String> = Vec::new();
        q.push_back(start_ix);
        while let Some(v_ix) = q.pop_front() {
            comp.extend(g.node_id_by_ix(v_ix).map(str::to_string));
            g.for_each_neighbor_ix(v_ix, |w_ix| {
                if !seen[w_ix] {
                    seen[w_ix] = true;
                    q.push_back(w_ix);
                }
            });
        }
        out.push(comp);
    }

    out
}

/// Strongly connected components that contain a cycle: every SCC with more than one node, plus
/// single nodes with a self-loop. Nodes within a cycle keep insertion order.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    const UNVISITED: usize = usize::MAX;

    let n = g.node_count();
    let mut index: Vec<usize> = vec![UNVISITED; n];
    let mut lowlink: Vec<usize> = vec![0; n];
    let mut on_stack: Vec<bool> = vec![false; n];
    let mut scc_stack: Vec<usize> = Vec::new();
    let mut next_index: usize = 0;
    let mut sccs: Vec<Vec<usize>> = Vec::new();

    let successors_ix = |v_ix: usize| -> Vec<usize> {
        let mut ws: Vec<usize> = Vec::new();
        g.for_each_out_edge_ix(v_ix, None, |_, w_ix, _, _| ws.push(w_ix));
        ws
    };

    for start_ix in 0..n {
        if index[start_ix] != UNVISITED {
            continue;
        }
        let mut call_stack: Vec<(usize, Vec<usize>, usize)> = Vec::new();
        index[start_ix] = next_index;
        lowlink[start_ix] = next_index;
        next_index += 1;
        scc_stack.push(start_ix);
        on_stack[start_ix] = true;
        call_stack.push((start_ix, successors_ix(start_ix), 0));

        while let Some((v_ix, ws, next)) = call_stack.last_mut() {
            let v_ix = *v_ix;
            if let Some(&w_ix) = ws.get(*next) {
                *next += 1;
                if index[w_ix] == UNVISITED {
                    index[w_ix] = next_index;
                    lowlink[w_ix] = next_index;
                    next_index += 1;
                    scc_stack.push(w_ix);
                    on_stack[w_ix] = true;
                    call_stack.push((w_ix, successors_ix(w_ix), 0));
                } else if on_stack[w_ix] {
                    lowlink[v_ix] = lowlink[v_ix].min(index[w_ix]);
                }
                continue;
            }

            call_stack.pop();
            if let Some((parent_ix, _, _)) = call_stack.last() {
                lowlink[*parent_ix] = lowlink[*parent_ix].min(lowlink[v_ix]);
            }
            if lowlink[v_ix] == index[v_ix] {
                let mut scc: Vec<usize> = Vec::new();
                while let Some(w_ix) = scc_stack.pop() {
                    on_stack[w_ix] = false;
                    scc.push(w_ix);
                    if w_ix == v_ix {
                        break;
                    }
                }
                sccs.push(scc);
            }
        }
    }

    let mut cycles: Vec<Vec<usize>> = sccs
        .into_iter()
        .filter(|scc| scc.len() > 1 || scc.first().is_some_and(|&v| g.has_edge_ix(v, v)))
        .map(|mut scc| {
            scc.sort_unstable();
            scc
        })
        .collect();
    cycles.sort_by_key(|scc| scc.first().copied());
    cycles
        .into_iter()
        .map(|scc| {
            scc.into_iter()
                .filter_map(|ix| g.node_id_by_ix(ix).map(str::to_string))
                .collect()
        })
        .collect()
}
