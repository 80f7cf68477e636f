//! Centrality measures and ranking

pub mod ncc;
pub mod betweenness;

pub use ncc::compute_ncc;
pub use betweenness::betweenness_centrality;

use std::cmp::Ordering;

use itertools::Itertools;

use crate::graph::CompressedGraph;

/// Out-degree centrality: out-degree divided by the number of other nodes.
///
/// A lone node has no other nodes to reach and scores 1.
pub fn out_degree_centrality(graph: &CompressedGraph) -> Vec<f64> {
    let n = graph.node_count;
    if n <= 1 {
        return vec![1.0; n];
    }

    let scale = 1.0 / (n - 1) as f64;
    (0..n).map(|node| graph.out_degree(node) as f64 * scale).collect()
}

/// Sort `(node, score)` pairs by descending score and keep the first `top_n`.
///
/// The sort is stable, so tied nodes keep their input order.
pub fn rank_top<N, S>(scores: impl IntoIterator<Item = (N, S)>, top_n: usize) -> Vec<(N, S)>
where
    S: PartialOrd,
{
    scores
        .into_iter()
        .sorted_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
        .take(top_n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn ranking_is_descending_and_stable() {
        let ranked = rank_top(vec![("a", 1u64), ("b", 3), ("c", 3), ("d", 0)], 3);
        assert_eq!(ranked, vec![("b", 3), ("c", 3), ("a", 1)]);
    }

    #[test]
    fn ranking_handles_short_input() {
        let ranked = rank_top(vec![(1u32, 0.5f64)], 10);
        assert_eq!(ranked, vec![(1, 0.5)]);
    }

    #[test]
    fn degree_centrality_scales_by_other_nodes() {
        let mut builder = GraphBuilder::with_capacity(3);
        builder.add_edge("a", "b");
        builder.add_edge("a", "c");
        let graph = builder.build();

        assert_eq!(out_degree_centrality(&graph), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn single_node_has_full_degree_centrality() {
        let mut builder = GraphBuilder::with_capacity(1);
        builder.get_or_create_node("solo");
        assert_eq!(out_degree_centrality(&builder.build()), vec![1.0]);

        assert!(out_degree_centrality(&GraphBuilder::with_capacity(0).build()).is_empty());
    }
}
