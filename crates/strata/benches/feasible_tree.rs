use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use strata::graphlib::{Graph, GraphOptions};
use strata::rank;
use strata::{EdgeLabel, GraphLabel, NodeLabel};

/// A connected DAG whose longest-path ranks leave many slack edges for the tree to absorb.
fn build_graph(node_count: usize) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions::default());
    let ids: Vec<String> = (0..node_count).map(|i| format!("n{i}")).collect();
    for (i, v) in ids.iter().enumerate() {
        if i + 1 < node_count {
            g.set_edge(v.as_str(), ids[i + 1].as_str());
        }
        if i % 3 == 0 && i + 7 < node_count {
            g.set_edge_with_label(
                v.as_str(),
                ids[i + 7].as_str(),
                EdgeLabel {
                    minlen: 2,
                    weight: 3.0,
                },
            );
        }
        if i % 5 == 0 {
            let leaf = format!("{v}_leaf");
            g.set_edge(leaf.as_str(), v.as_str());
        }
    }
    rank::util::longest_path(&mut g).expect("benchmark graph is acyclic");
    g
}

fn bench_feasible_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("feasible_tree");

    for nodes in [100usize, 500, 1000] {
        group.bench_with_input(
            BenchmarkId::new("chain_with_skips", nodes),
            &nodes,
            |b, &n| {
                b.iter_batched(
                    || build_graph(n),
                    |mut g| {
                        let t = rank::feasible_tree::feasible_tree(black_box(&mut g))
                            .expect("benchmark graph is connected");
                        black_box(t.edge_count());
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_feasible_tree);
criterion_main!(benches);
