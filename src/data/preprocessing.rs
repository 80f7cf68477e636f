//! Data preprocessing module for graph analysis

use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::graph::{CompressedGraph, GraphBuilder};

/// Extract the subgraph induced by a node set.
///
/// Nodes keep their string IDs; internal indices are renumbered in ascending
/// order of the original index.
pub fn induced_subgraph(graph: &CompressedGraph, nodes: &HashSet<u32>) -> CompressedGraph {
    let mut kept: Vec<u32> = nodes.iter().copied().collect();
    kept.sort_unstable();

    let mut builder = GraphBuilder::with_capacity(kept.len());
    for &node in &kept {
        builder.get_or_create_node(graph.node_id(node));
    }

    for &node in &kept {
        for &target in graph.outgoing_edges(node as usize) {
            // Only include edges where both endpoints are in the subgraph
            if nodes.contains(&target) {
                builder.add_edge(graph.node_id(node), graph.node_id(target));
            }
        }
    }

    builder.build()
}

/// Keep a random `ratio` share of `members`, rounded down.
///
/// A ratio of 1.0 or more returns every member.
pub fn sample_members<R: Rng + ?Sized>(members: &[String], ratio: f64, rng: &mut R) -> Vec<String> {
    if ratio >= 1.0 {
        return members.to_vec();
    }

    let amount = (members.len() as f64 * ratio.max(0.0)) as usize;
    members.iter().cloned().choose_multiple(rng, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn subgraph_keeps_internal_edges_only() {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge("a", "b");
        builder.add_edge("b", "c");
        builder.add_edge("c", "d");
        let graph = builder.build();

        let keep: HashSet<u32> = ["b", "c", "d"]
            .iter()
            .map(|id| graph.node_index(id).unwrap())
            .collect();
        let sub = induced_subgraph(&graph, &keep);

        assert_eq!(sub.node_ids, vec!["b", "c", "d"]);
        assert_eq!(sub.edge_count(), 2);
        assert!(sub.node_index("a").is_none());
    }

    #[test]
    fn sampling_shrinks_and_stays_within_members() {
        let members: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let sampled = sample_members(&members, 0.35, &mut rng);
        assert_eq!(sampled.len(), 3);
        assert!(sampled.iter().all(|m| members.contains(m)));

        assert_eq!(sample_members(&members, 1.0, &mut rng), members);
        assert!(sample_members(&members, 0.0, &mut rng).is_empty());
    }
}
