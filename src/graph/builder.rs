//! Graph construction module

use crate::graph::CompressedGraph;
use std::collections::HashMap;

/// Builder for incrementally constructing a CompressedGraph
pub struct GraphBuilder {
    /// Number of nodes
    node_count: usize,

    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs
    node_ids: Vec<String>,

    /// Adjacency lists for each node
    adjacency_lists: Vec<Vec<u32>>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            node_count: 0,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
        }
    }

    /// Get or create a node ID for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        // Create a new node
        let idx = self.node_count as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency_lists.push(Vec::new());
        self.node_count += 1;

        idx
    }

    /// Add an edge from one node to another
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);

        self.adjacency_lists[src_idx as usize].push(dst_idx);
    }

    /// Add an edge between nodes that already exist
    pub fn add_edge_by_index(&mut self, src_idx: u32, dst_idx: u32) {
        self.adjacency_lists[src_idx as usize].push(dst_idx);
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Build the compressed graph.
    ///
    /// Parallel edges collapse into one; self-loops are kept.
    pub fn build(mut self) -> CompressedGraph {
        for list in &mut self.adjacency_lists {
            // Sort for binary search efficiency
            list.sort_unstable();
            list.dedup();
        }

        let edge_count: usize = self.adjacency_lists.iter()
            .map(|list| list.len())
            .sum();

        // Create offsets array
        let mut offsets = Vec::with_capacity(self.node_count + 1);
        offsets.push(0);

        let mut offset = 0;
        for list in &self.adjacency_lists {
            offset += list.len() as u32;
            offsets.push(offset);
        }

        let mut edges = Vec::with_capacity(edge_count);
        for list in &self.adjacency_lists {
            edges.extend_from_slice(list);
        }

        // Reverse adjacency: count, prefix-sum, then scatter.
        // Sources are visited in ascending order, so each incoming list comes out sorted.
        let mut in_counts = vec![0u32; self.node_count];
        for &dst in &edges {
            in_counts[dst as usize] += 1;
        }

        let mut in_offsets = Vec::with_capacity(self.node_count + 1);
        in_offsets.push(0);
        let mut current_offset = 0;
        for &count in &in_counts {
            current_offset += count;
            in_offsets.push(current_offset);
        }

        let mut in_edges = vec![0u32; edge_count];
        let mut current_pos = vec![0usize; self.node_count];
        for (src, list) in self.adjacency_lists.iter().enumerate() {
            for &dst in list {
                let dst_idx = dst as usize;
                let pos = in_offsets[dst_idx] as usize + current_pos[dst_idx];
                in_edges[pos] = src as u32;
                current_pos[dst_idx] += 1;
            }
        }

        CompressedGraph {
            node_count: self.node_count,
            offsets,
            edges,
            in_offsets,
            in_edges,
            node_ids: self.node_ids,
            id_to_index: self.id_to_index,
        }
    }
}
