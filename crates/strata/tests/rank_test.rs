use strata::graphlib::{Graph, GraphOptions};
use strata::{EdgeLabel, Error, GraphLabel, NodeLabel, Ranker, rank};

fn gansner_graph() -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions::default());
    g.set_graph(GraphLabel::default());
    g.set_default_node_label(NodeLabel::default);
    g.set_default_edge_label(EdgeLabel::default);

    g.set_path(&["a", "b", "c", "d", "h"]);
    g.set_path(&["a", "e", "g", "h"]);
    g.set_path(&["a", "f", "g"]);
    g
}

fn assert_respects_minlen(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for e in g.edges() {
        let v_rank = g.node(&e.v).unwrap().rank.unwrap();
        let w_rank = g.node(&e.w).unwrap().rank.unwrap();
        let minlen = g.edge_by_key(e).unwrap().minlen as i32;
        assert!(
            w_rank - v_rank >= minlen,
            "edge {} -> {} violates minlen {}: {} - {}",
            e.v,
            e.w,
            minlen,
            w_rank,
            v_rank
        );
    }
}

fn min_rank(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Option<i32> {
    g.nodes()
        .filter_map(|v| g.node(v).and_then(|n| n.rank))
        .min()
}

#[test]
fn rank_respects_the_minlen_attribute_for_each_ranker() {
    for ranker in [
        Ranker::LongestPath,
        Ranker::TightTree,
        Ranker::NetworkSimplex,
    ] {
        let mut g = gansner_graph();
        g.graph_mut().ranker = ranker;
        rank::rank(&mut g).unwrap();
        assert_respects_minlen(&g);
        assert_eq!(min_rank(&g), Some(0), "{ranker:?}");
    }
}

#[test]
fn rank_defaults_to_network_simplex() {
    let mut g = gansner_graph();
    rank::rank(&mut g).unwrap();
    assert_eq!(g.node("e").unwrap().rank, Some(1));
    assert_eq!(g.node("g").unwrap().rank, Some(2));
    assert_eq!(g.node("h").unwrap().rank, Some(4));
}

#[test]
fn rank_can_rank_a_single_node_graph_for_each_ranker() {
    for ranker in [
        Ranker::LongestPath,
        Ranker::TightTree,
        Ranker::NetworkSimplex,
    ] {
        let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions::default());
        g.set_graph(GraphLabel { ranker });
        g.set_node("a", NodeLabel::default());
        rank::rank(&mut g).unwrap();
        assert_eq!(g.node("a").unwrap().rank, Some(0));
    }
}

#[test]
fn rank_tight_tree_handles_disconnected_graphs() {
    let mut g = gansner_graph();
    g.graph_mut().ranker = Ranker::TightTree;
    g.set_path(&["x", "y"]);
    rank::rank(&mut g).unwrap();
    assert_respects_minlen(&g);
    assert_eq!(g.node_count(), 10);
    assert_eq!(min_rank(&g), Some(0));
}

#[test]
fn rank_none_leaves_ranks_alone() {
    let mut g = gansner_graph();
    g.graph_mut().ranker = Ranker::None;
    g.set_node("a", NodeLabel { rank: Some(7) });
    rank::rank(&mut g).unwrap();
    assert_eq!(g.node("a").unwrap().rank, Some(7));
    assert_eq!(g.node("b").unwrap().rank, None);
}

#[test]
fn rank_longest_path_validates_weights() {
    let mut g = gansner_graph();
    g.graph_mut().ranker = Ranker::LongestPath;
    g.set_edge_with_label(
        "a",
        "h",
        EdgeLabel {
            minlen: 1,
            weight: -2.0,
        },
    );
    let err = rank::rank(&mut g).unwrap_err();
    assert!(
        matches!(err, Error::InvalidWeight { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn rank_longest_path_reports_overflowing_ranks_without_writing_any() {
    let mut g = gansner_graph();
    g.graph_mut().ranker = Ranker::LongestPath;
    for (v, w) in [("a", "b"), ("b", "c")] {
        g.set_edge_with_label(
            v,
            w,
            EdgeLabel {
                minlen: 1_500_000_000,
                weight: 1.0,
            },
        );
    }

    let err = rank::rank(&mut g).unwrap_err();
    assert!(
        matches!(err, Error::RankOverflow { .. }),
        "unexpected error: {err}"
    );
    assert_eq!(min_rank(&g), None);
}

#[test]
fn validate_rejects_minlens_beyond_i32() {
    let mut g = gansner_graph();
    g.set_edge_with_label(
        "b",
        "h",
        EdgeLabel {
            minlen: usize::MAX,
            weight: 1.0,
        },
    );
    let err = rank::validate(&g).unwrap_err();
    assert!(
        matches!(err, Error::InvalidMinlen { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn validate_accepts_zero_weights() {
    let mut g = gansner_graph();
    g.set_edge_with_label(
        "b",
        "h",
        EdgeLabel {
            minlen: 1,
            weight: 0.0,
        },
    );
    assert!(rank::validate(&g).is_ok());
}
