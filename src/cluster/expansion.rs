//! Influencer cluster expansion

use std::collections::HashSet;

use crate::cluster::InfluencerCluster;
use crate::graph::DirectedGraph;

/// Grow one cluster per seed by following outgoing edges `radius` times.
///
/// Each round reads a frozen snapshot of the cluster's membership and writes
/// the successors of every snapshot member into the live set, so a round
/// expands exactly one hop. Repeated seeds produce one cluster, at the
/// position of their first occurrence.
///
/// Cost is proportional to `radius` times the edges touched, which can blow up
/// quickly on dense graphs; callers should bound `radius`.
pub fn expand_clusters<G: DirectedGraph>(
    graph: &G,
    seeds: &[G::Node],
    radius: usize,
) -> Vec<InfluencerCluster<G::Node>> {
    let mut seen = HashSet::with_capacity(seeds.len());
    let mut clusters: Vec<InfluencerCluster<G::Node>> = seeds
        .iter()
        .filter(|&&seed| seen.insert(seed))
        .map(|&seed| InfluencerCluster::new(seed))
        .collect();

    for round in 0..radius {
        for cluster in &mut clusters {
            let snapshot: Vec<G::Node> = cluster.members.iter().copied().collect();
            for member in snapshot {
                cluster.members.extend(graph.successors(member));
            }
        }

        log::debug!(
            "Cluster expansion round {}: {} total memberships",
            round + 1,
            clusters.iter().map(|c| c.size()).sum::<usize>()
        );
    }

    clusters
}
