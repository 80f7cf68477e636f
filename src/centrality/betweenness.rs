//! Betweenness centrality (Brandes' algorithm)

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::graph::CompressedGraph;

/// Normalized betweenness centrality of every node, indexed by node.
///
/// Runs one unweighted shortest-path pass per source node on the rayon pool
/// and sums the per-source dependencies. Scores are scaled by
/// 1 / ((n - 1)(n - 2)) when the graph has more than two nodes.
pub fn betweenness_centrality(graph: &CompressedGraph) -> Vec<f64> {
    let node_count = graph.node_count;
    log::info!("Computing betweenness centrality over {} sources", node_count);

    let mut centrality = (0..node_count)
        .into_par_iter()
        .fold(
            || vec![0.0f64; node_count],
            |mut acc, source| {
                accumulate_from_source(graph, source, &mut acc);
                acc
            },
        )
        .reduce(
            || vec![0.0f64; node_count],
            |mut left, right| {
                for (l, r) in left.iter_mut().zip(right) {
                    *l += r;
                }
                left
            },
        );

    if node_count > 2 {
        let scale = 1.0 / ((node_count - 1) * (node_count - 2)) as f64;
        for value in &mut centrality {
            *value *= scale;
        }
    }

    centrality
}

fn accumulate_from_source(graph: &CompressedGraph, source: usize, acc: &mut [f64]) {
    let node_count = graph.node_count;
    let mut stack: Vec<usize> = Vec::with_capacity(node_count);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut sigma = vec![0.0f64; node_count];
    let mut dist = vec![-1i64; node_count];

    sigma[source] = 1.0;
    dist[source] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for &w in graph.outgoing_edges(v) {
            let w = w as usize;
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                preds[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0f64; node_count];
    while let Some(w) = stack.pop() {
        for &v in &preds[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != source {
            acc[w] += delta[w];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn middle_of_a_path_carries_the_traffic() {
        let mut builder = GraphBuilder::with_capacity(3);
        builder.add_edge("a", "b");
        builder.add_edge("b", "c");
        let graph = builder.build();

        let scores = betweenness_centrality(&graph);
        assert!(close(scores[0], 0.0));
        assert!(close(scores[1], 0.5));
        assert!(close(scores[2], 0.0));
    }

    #[test]
    fn split_paths_share_credit() {
        // s -> {x, y} -> t: each middle node lies on half the s..t shortest paths
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge("s", "x");
        builder.add_edge("s", "y");
        builder.add_edge("x", "t");
        builder.add_edge("y", "t");
        let graph = builder.build();

        let scores = betweenness_centrality(&graph);
        let x = graph.node_index("x").unwrap() as usize;
        let y = graph.node_index("y").unwrap() as usize;
        assert!(close(scores[x], 0.5 / 6.0));
        assert!(close(scores[y], 0.5 / 6.0));
    }

    #[test]
    fn tiny_graphs_are_not_scaled() {
        let mut builder = GraphBuilder::with_capacity(2);
        builder.add_edge("a", "b");
        let graph = builder.build();
        assert_eq!(betweenness_centrality(&graph), vec![0.0, 0.0]);
    }
}
