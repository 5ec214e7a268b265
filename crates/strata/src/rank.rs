//! Ranking algorithms (network simplex, tight tree, longest path).
//!
//! [`rank`] dispatches on the graph label's [`Ranker`]. The tree-based rankers run on a private
//! working copy of the input and only write node ranks back, so the caller's graph never sees
//! simplified edges or helper nodes.

use crate::graphlib::{Graph, alg};
use crate::util::IdGen;
use crate::{EdgeLabel, Error, GraphLabel, NodeLabel, Ranker, Result};
use tracing::debug;

pub mod feasible_tree;
pub mod network_simplex;
pub mod tree;
pub mod util;

/// Assigns `rank` on every node using the ranker selected by `g.graph().ranker`.
///
/// Every ranker except [`Ranker::None`] leaves the minimum rank at 0.
pub fn rank(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    let ranker = g.graph().ranker;
    debug!(ranker = ranker.as_str(), "ranking graph");
    match ranker {
        Ranker::NetworkSimplex => network_simplex::network_simplex(g),
        Ranker::TightTree => tight_tree(g),
        Ranker::LongestPath => {
            validate(g)?;
            util::longest_path(g)?;
            crate::util::normalize_ranks(g)
        }
        Ranker::None => Ok(()),
    }
}

/// Rejects edge weights that are negative, NaN or infinite, and minlens larger than `i32::MAX`.
pub fn validate(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    for e in g.edges() {
        let Some(lbl) = g.edge_by_key(e) else {
            continue;
        };
        if !lbl.weight.is_finite() || lbl.weight < 0.0 {
            return Err(Error::InvalidWeight {
                v: e.v.clone(),
                w: e.w.clone(),
                weight: lbl.weight,
            });
        }
        if i32::try_from(lbl.minlen).is_err() {
            return Err(Error::InvalidMinlen {
                v: e.v.clone(),
                w: e.w.clone(),
                minlen: lbl.minlen,
            });
        }
    }
    Ok(())
}

fn tight_tree(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    let mut work = WorkingGraph::prepare(g)?;
    feasible_tree::feasible_tree(&mut work.graph)?;
    work.finish(g)
}

/// The graph the tree-based rankers actually run on.
///
/// It is the simplified input, plus a fake root joined to one node of every weakly connected
/// component when there is more than one, so a single spanning tree always exists. The fake root's
/// edges have weight 0 and minlen 0, which leaves the optimum over the real nodes unchanged.
pub(crate) struct WorkingGraph {
    pub(crate) graph: Graph<NodeLabel, EdgeLabel, GraphLabel>,
    fake_root: Option<String>,
}

impl WorkingGraph {
    /// Validates `g`, builds the working copy and seeds it with longest-path ranks.
    pub(crate) fn prepare(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<Self> {
        validate(g)?;
        let mut graph = crate::util::simplify(g);

        let components = alg::components(&graph);
        let fake_root = if components.len() > 1 {
            let root = IdGen::new("_root").next_unused(&graph);
            for comp in &components {
                let Some(rep) = comp.first() else {
                    continue;
                };
                graph.set_edge_with_label(
                    root.clone(),
                    rep.clone(),
                    EdgeLabel {
                        minlen: 0,
                        weight: 0.0,
                    },
                );
            }
            Some(root)
        } else {
            None
        };

        debug!(
            nodes = g.node_count(),
            edges = graph.edge_count(),
            components = components.len(),
            fake_root = fake_root.is_some(),
            "prepared ranking graph"
        );

        util::longest_path(&mut graph)?;
        Ok(Self { graph, fake_root })
    }

    /// Drops the fake root, normalizes, and copies the ranks onto `g`.
    ///
    /// `g` is only written once normalization succeeded.
    pub(crate) fn finish(mut self, g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
        if let Some(root) = self.fake_root.take() {
            self.graph.remove_node(&root);
        }
        crate::util::normalize_ranks(&mut self.graph)?;

        let ranked = &self.graph;
        g.for_each_node_mut(|v, lbl| {
            if let Some(rank) = ranked.node(v).and_then(|n| n.rank) {
                lbl.rank = Some(rank);
            }
        });
        Ok(())
    }
}
