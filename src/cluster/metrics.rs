//! Cluster statistics and metrics

use std::collections::HashSet;

use crate::cluster::InfluencerCluster;
use crate::graph::CompressedGraph;

/// Calculate density (actual edges / potential edges) of a node set
pub fn calculate_density(graph: &CompressedGraph, members: &HashSet<u32>) -> f32 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    // Potential edges = n * (n - 1) for directed graph
    let potential_edges = n * (n - 1);

    let mut actual_edges = 0;
    for &src in members {
        for &dst in graph.outgoing_edges(src as usize) {
            // Self-loops are not potential edges
            if dst != src && members.contains(&dst) {
                actual_edges += 1;
            }
        }
    }

    actual_edges as f32 / potential_edges as f32
}

/// Per-cluster summary used in reports
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterMetrics {
    pub seed: String,
    pub size: usize,
    pub density: f32,
}

pub fn cluster_metrics(graph: &CompressedGraph, cluster: &InfluencerCluster<u32>) -> ClusterMetrics {
    ClusterMetrics {
        seed: graph.node_id(cluster.seed).to_string(),
        size: cluster.size(),
        density: calculate_density(graph, &cluster.members),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn density_of_mutual_pair_is_one() {
        let mut builder = GraphBuilder::with_capacity(3);
        builder.add_edge("a", "b");
        builder.add_edge("b", "a");
        builder.add_edge("b", "c");
        let graph = builder.build();

        let pair: HashSet<u32> = [0, 1].into_iter().collect();
        assert_eq!(calculate_density(&graph, &pair), 1.0);

        let all: HashSet<u32> = [0, 1, 2].into_iter().collect();
        assert_eq!(calculate_density(&graph, &all), 0.5);
    }

    #[test]
    fn metrics_name_the_seed() {
        let mut builder = GraphBuilder::with_capacity(2);
        builder.add_edge("root", "leaf");
        let graph = builder.build();

        let mut cluster = InfluencerCluster::new(0);
        cluster.members.insert(1);
        let metrics = cluster_metrics(&graph, &cluster);
        assert_eq!(metrics.seed, "root");
        assert_eq!(metrics.size, 2);
        assert_eq!(metrics.density, 0.5);
    }
}
