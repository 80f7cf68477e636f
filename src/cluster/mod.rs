//! Influencer cluster analysis module

pub mod expansion;
pub mod metrics;

pub use expansion::expand_clusters;

use std::collections::HashSet;
use std::hash::Hash;

/// Nodes within a bounded number of outgoing hops of one seed ("influencer").
///
/// The seed is always a member of its own cluster. Clusters are independent,
/// so a node may belong to any number of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluencerCluster<N: Eq + Hash> {
    /// The node this cluster was grown from
    pub seed: N,

    /// Members, including the seed
    pub members: HashSet<N>,
}

impl<N: Copy + Eq + Hash> InfluencerCluster<N> {
    /// A cluster holding only its seed
    pub fn new(seed: N) -> Self {
        Self {
            seed,
            members: HashSet::from([seed]),
        }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    #[cfg(test)]
    pub fn contains(&self, node: &N) -> bool {
        self.members.contains(node)
    }
}
