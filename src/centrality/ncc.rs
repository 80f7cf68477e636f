//! Neighbor Cumulative Degree Centrality (NCC)
//!
//! A node's NCC score is the sum of the degrees of the nodes adjacent to it in
//! one direction. With `in_degree` set, every node hands its out-degree to each
//! of its predecessors; otherwise every node hands its in-degree to each of its
//! successors. Scores are raw integer sums with no normalization.

use std::collections::HashMap;

use crate::graph::DirectedGraph;

/// Compute NCC for every node of `graph`.
///
/// Pairs come back in `graph.nodes()` order; callers sort them to rank.
pub fn compute_ncc<G: DirectedGraph>(graph: &G, in_degree: bool) -> Vec<(G::Node, u64)> {
    let mut scores: HashMap<G::Node, u64> = graph.nodes().map(|n| (n, 0)).collect();

    for node in graph.nodes() {
        if in_degree {
            let degree = graph.out_degree(node) as u64;
            for p in graph.predecessors(node) {
                *scores.entry(p).or_insert(0) += degree;
            }
        } else {
            let degree = graph.in_degree(node) as u64;
            for p in graph.successors(node) {
                *scores.entry(p).or_insert(0) += degree;
            }
        }
    }

    graph
        .nodes()
        .map(|n| (n, scores.get(&n).copied().unwrap_or(0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CompressedGraph, GraphBuilder};
    use petgraph::graph::Graph;
    use proptest::prelude::*;

    fn chain() -> CompressedGraph {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge("A", "B");
        builder.add_edge("B", "C");
        builder.add_edge("C", "D");
        builder.build()
    }

    fn by_id(graph: &CompressedGraph, scores: &[(u32, u64)]) -> Vec<(String, u64)> {
        scores
            .iter()
            .map(|&(n, s)| (graph.node_id(n).to_string(), s))
            .collect()
    }

    #[test]
    fn chain_successor_variant() {
        let graph = chain();
        let scores = compute_ncc(&graph, false);
        assert_eq!(
            by_id(&graph, &scores),
            vec![
                ("A".to_string(), 0),
                ("B".to_string(), 0),
                ("C".to_string(), 1),
                ("D".to_string(), 1),
            ]
        );
    }

    #[test]
    fn chain_predecessor_variant() {
        // A gets out_degree(B) = 1, B gets out_degree(C) = 1, C gets out_degree(D) = 0
        let graph = chain();
        let scores = compute_ncc(&graph, true);
        assert_eq!(
            by_id(&graph, &scores),
            vec![
                ("A".to_string(), 1),
                ("B".to_string(), 1),
                ("C".to_string(), 0),
                ("D".to_string(), 0),
            ]
        );
    }

    #[test]
    fn star_rewards_hub_followers() {
        // Everyone follows the hub; the hub follows nobody.
        let mut builder = GraphBuilder::with_capacity(4);
        for leaf in ["x", "y", "z"] {
            builder.add_edge(leaf, "hub");
        }
        builder.add_edge("x", "y");
        let graph = builder.build();

        let scores: HashMap<String, u64> = by_id(&graph, &compute_ncc(&graph, false))
            .into_iter()
            .collect();
        // x, y, z have in-degree 0, 1, 0
        assert_eq!(scores["hub"], 1);
        assert_eq!(scores["y"], 0);
        assert_eq!(scores["x"], 0);
    }

    #[test]
    fn self_loop_counts_toward_own_score() {
        let mut builder = GraphBuilder::with_capacity(2);
        builder.add_edge("a", "a");
        builder.add_edge("b", "a");
        let graph = builder.build();

        let scores = by_id(&graph, &compute_ncc(&graph, true));
        // a: out 1, preds {a, b} -> a += 1, b += 1
        assert_eq!(scores, vec![("a".to_string(), 1), ("b".to_string(), 1)]);
    }

    #[test]
    fn source_scores_through_its_successor() {
        // b has no predecessors but follows a, which follows itself
        let graph = build(2, &[(0, 0), (1, 0)]);
        let scores = compute_ncc(&graph, true);
        assert_eq!(graph.in_degree(1), 0);
        assert_eq!(scores, vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn isolated_nodes_score_zero() {
        let mut builder = GraphBuilder::with_capacity(3);
        builder.get_or_create_node("lonely");
        builder.add_edge("a", "b");
        let graph = builder.build();

        for in_degree in [true, false] {
            let scores = by_id(&graph, &compute_ncc(&graph, in_degree));
            assert_eq!(scores[0], ("lonely".to_string(), 0));
        }
    }

    #[test]
    fn works_over_petgraph() {
        let mut g: Graph<&str, ()> = Graph::new();
        let a = g.add_node("A");
        let b = g.add_node("B");
        let c = g.add_node("C");
        g.add_edge(a, b, ());
        g.add_edge(b, c, ());

        let scores = compute_ncc(&g, false);
        assert_eq!(scores, vec![(a, 0), (b, 0), (c, 1)]);
    }

    fn arb_edges() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1usize..12).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..40)))
    }

    fn build(n: usize, edges: &[(usize, usize)]) -> CompressedGraph {
        let mut builder = GraphBuilder::with_capacity(n);
        for i in 0..n {
            builder.get_or_create_node(&i.to_string());
        }
        for &(s, d) in edges {
            builder.add_edge(&s.to_string(), &d.to_string());
        }
        builder.build()
    }

    proptest! {
        #[test]
        fn total_equals_sum_of_degree_products((n, edges) in arb_edges()) {
            let graph = build(n, &edges);
            let total: u64 = compute_ncc(&graph, true).iter().map(|&(_, s)| s).sum();
            let expected: u64 = (0..graph.node_count)
                .map(|i| (graph.out_degree(i) * graph.in_degree(i)) as u64)
                .sum();
            prop_assert_eq!(total, expected);
        }

        #[test]
        fn sinks_score_zero_in_predecessor_mode((n, edges) in arb_edges()) {
            let graph = build(n, &edges);
            for (node, score) in compute_ncc(&graph, true) {
                if graph.out_degree(node as usize) == 0 {
                    prop_assert_eq!(score, 0);
                }
            }
        }

        #[test]
        fn sources_score_zero_in_successor_mode((n, edges) in arb_edges()) {
            let graph = build(n, &edges);
            for (node, score) in compute_ncc(&graph, false) {
                if graph.in_degree(node as usize) == 0 {
                    prop_assert_eq!(score, 0);
                }
            }
        }

        #[test]
        fn every_node_appears_once((n, edges) in arb_edges()) {
            let graph = build(n, &edges);
            let scores = compute_ncc(&graph, false);
            prop_assert_eq!(scores.len(), graph.node_count);
            let nodes: Vec<u32> = scores.iter().map(|&(node, _)| node).collect();
            prop_assert_eq!(nodes, (0..graph.node_count as u32).collect::<Vec<_>>());
        }
    }
}
