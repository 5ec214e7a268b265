use strata_graphlib::{Graph, GraphOptions};

fn undirected<E: Default + 'static>() -> Graph<(), E, ()> {
    Graph::new(GraphOptions {
        directed: false,
        ..Default::default()
    })
}

#[test]
fn undirected_edges_are_symmetric() {
    let mut g: Graph<(), i32, ()> = undirected();
    g.set_edge_with_label("b", "a", 7);

    assert!(g.has_edge("a", "b", None));
    assert!(g.has_edge("b", "a", None));
    assert_eq!(g.edge("a", "b", None), Some(&7));
    assert_eq!(g.edge("b", "a", None), Some(&7));

    let a = g.node_ix("a").unwrap();
    let b = g.node_ix("b").unwrap();
    assert_eq!(g.edge_by_endpoints_ix(a, b), Some(&7));
    assert_eq!(g.edge_by_endpoints_ix(b, a), Some(&7));
}

#[test]
fn undirected_edges_are_incident_for_in_and_out_edges() {
    let mut g: Graph<(), (), ()> = undirected();
    g.set_edge("a", "b");
    g.set_edge("b", "c");

    assert_eq!(g.out_edges("b", None).len(), 2);
    assert_eq!(g.in_edges("b", None).len(), 2);

    assert_eq!(g.out_edges("b", Some("a")).len(), 1);
    assert_eq!(g.out_edges("b", Some("c")).len(), 1);
    assert_eq!(g.in_edges("b", Some("a")).len(), 1);
    assert_eq!(g.in_edges("b", Some("c")).len(), 1);
}

#[test]
fn undirected_successors_predecessors_and_neighbors_are_the_same() {
    let mut g: Graph<(), (), ()> = undirected();
    g.set_edge("a", "b");
    g.set_edge("b", "c");

    let mut succ = g.successors("b");
    let mut pred = g.predecessors("b");
    let mut neigh = g.neighbors("b");
    succ.sort();
    pred.sort();
    neigh.sort();

    assert_eq!(succ, vec!["a", "c"]);
    assert_eq!(pred, vec!["a", "c"]);
    assert_eq!(neigh, vec!["a", "c"]);
}

#[test]
fn undirected_node_edges_returns_incident_edges() {
    let mut g: Graph<(), (), ()> = undirected();
    g.set_edge("a", "b");
    g.set_edge("b", "c");

    let edges = g.node_edges("b");
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().any(|e| e.v == "a" && e.w == "b"));
    assert!(edges.iter().any(|e| e.v == "b" && e.w == "c"));
}

#[test]
fn undirected_remove_edge_accepts_either_orientation() {
    let mut g: Graph<(), (), ()> = undirected();
    g.set_path(&["a", "b", "c"]);

    assert!(g.remove_edge("b", "a", None));
    assert!(!g.has_edge("a", "b", None));
    assert_eq!(g.neighbors("b"), vec!["c"]);
    assert_eq!(g.neighbors("a"), Vec::<&str>::new());
}

#[test]
fn undirected_neighbors_follow_edge_insertion_order() {
    let mut g: Graph<(), (), ()> = undirected();
    g.set_edge("m", "z");
    g.set_edge("a", "m");
    g.set_edge("m", "q");

    assert_eq!(g.neighbors("m"), vec!["z", "a", "q"]);
}
