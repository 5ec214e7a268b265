use strata::graphlib::{EdgeKey, Graph, GraphOptions};
use strata::{EdgeLabel, Error, GraphLabel, NodeLabel, rank, util};

fn new_graph() -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions::default());
    g.set_graph(GraphLabel::default());
    g.set_default_node_label(NodeLabel::default);
    g.set_default_edge_label(EdgeLabel::default);
    g
}

fn rank_of(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, v: &str) -> i32 {
    g.node(v).and_then(|n| n.rank).unwrap()
}

#[test]
fn longest_path_can_assign_a_rank_to_a_single_node_graph() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::default());

    rank::util::longest_path(&mut g).unwrap();
    util::normalize_ranks(&mut g).unwrap();

    assert_eq!(rank_of(&g, "a"), 0);
}

#[test]
fn longest_path_can_assign_ranks_to_unconnected_nodes() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::default());
    g.set_node("b", NodeLabel::default());

    rank::util::longest_path(&mut g).unwrap();
    util::normalize_ranks(&mut g).unwrap();

    assert_eq!(rank_of(&g, "a"), 0);
    assert_eq!(rank_of(&g, "b"), 0);
}

#[test]
fn longest_path_can_assign_ranks_to_connected_nodes() {
    let mut g = new_graph();
    g.set_edge("a", "b");

    rank::util::longest_path(&mut g).unwrap();
    util::normalize_ranks(&mut g).unwrap();

    assert_eq!(rank_of(&g, "a"), 0);
    assert_eq!(rank_of(&g, "b"), 1);
}

#[test]
fn longest_path_can_assign_ranks_for_a_diamond() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "d"]);
    g.set_path(&["a", "c", "d"]);

    rank::util::longest_path(&mut g).unwrap();
    util::normalize_ranks(&mut g).unwrap();

    assert_eq!(rank_of(&g, "a"), 0);
    assert_eq!(rank_of(&g, "b"), 1);
    assert_eq!(rank_of(&g, "c"), 1);
    assert_eq!(rank_of(&g, "d"), 2);
}

#[test]
fn longest_path_uses_the_minlen_attribute_on_the_edge() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "d"]);
    g.set_edge("a", "c");
    g.set_edge_with_label(
        "c",
        "d",
        EdgeLabel {
            minlen: 2,
            ..Default::default()
        },
    );

    rank::util::longest_path(&mut g).unwrap();
    util::normalize_ranks(&mut g).unwrap();

    assert_eq!(rank_of(&g, "a"), 0);
    assert_eq!(rank_of(&g, "b"), 2);
    assert_eq!(rank_of(&g, "c"), 1);
    assert_eq!(rank_of(&g, "d"), 3);
}

#[test]
fn longest_path_puts_sinks_on_rank_zero() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c"]);
    g.set_edge("a", "x");

    rank::util::longest_path(&mut g).unwrap();

    assert_eq!(rank_of(&g, "c"), 0);
    assert_eq!(rank_of(&g, "x"), 0);
    assert_eq!(rank_of(&g, "b"), -1);
    assert_eq!(rank_of(&g, "a"), -2);
}

#[test]
fn longest_path_handles_a_deep_chain() {
    let mut g = new_graph();
    let ids: Vec<String> = (0..50_000).map(|i| format!("n{i}")).collect();
    for pair in ids.windows(2) {
        g.set_edge(pair[0].as_str(), pair[1].as_str());
    }

    rank::util::longest_path(&mut g).unwrap();
    util::normalize_ranks(&mut g).unwrap();

    assert_eq!(rank_of(&g, "n0"), 0);
    assert_eq!(rank_of(&g, "n49999"), 49_999);
}

#[test]
fn longest_path_reports_the_cycle_it_finds() {
    let mut g = new_graph();
    g.set_edge("x", "a");
    g.set_path(&["a", "b", "a"]);

    let err = rank::util::longest_path(&mut g).unwrap_err();
    match err {
        Error::Cycle { nodes } => assert_eq!(nodes, vec!["a", "b"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn longest_path_treats_a_self_loop_as_a_cycle() {
    let mut g = new_graph();
    g.set_edge("a", "a");

    let err = rank::util::longest_path(&mut g).unwrap_err();
    assert_eq!(err.to_string(), "graph contains a cycle through: a");
}

#[test]
fn slack_measures_the_distance_beyond_minlen() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel { rank: Some(0) });
    g.set_node("b", NodeLabel { rank: Some(3) });
    g.set_edge_with_label(
        "a",
        "b",
        EdgeLabel {
            minlen: 2,
            weight: 1.0,
        },
    );

    assert_eq!(rank::util::slack(&g, &EdgeKey::new("a", "b")), 1);
}
