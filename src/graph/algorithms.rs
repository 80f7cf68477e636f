//! Graph algorithms for analysis

use std::collections::HashMap;

use crate::graph::CompressedGraph;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set (for union by size)
    rank: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            rank: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        // Path compression: point every visited node at the root
        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach smaller tree under root of larger tree
        let rank_x = self.rank[root_x as usize];
        let rank_y = self.rank[root_y as usize];

        if rank_x > rank_y {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += rank_y;
        } else {
            self.parent[root_x as usize] = root_y;
            self.rank[root_y as usize] += rank_x;
        }
    }

    /// Get the size of the set containing x
    #[cfg(test)]
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.rank[root as usize]
    }
}

/// Find connected components ignoring edge direction.
///
/// Returns the member lists, largest component first.
pub fn weakly_connected_components(graph: &CompressedGraph) -> Vec<Vec<u32>> {
    log::info!("Finding connected components (ignoring direction)");

    let node_count = graph.node_count;
    let mut sets = DisjointSets::new(node_count);

    for src in 0..node_count {
        for &dst in graph.outgoing_edges(src) {
            sets.union(src as u32, dst);
        }
    }

    let mut by_root: HashMap<u32, Vec<u32>> = HashMap::new();
    for node in 0..node_count as u32 {
        let root = sets.find(node);
        by_root.entry(root).or_default().push(node);
    }

    let mut components: Vec<Vec<u32>> = by_root.into_values().collect();
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));

    log::debug!("Found {} connected components", components.len());

    components
}
