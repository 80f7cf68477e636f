//! Memory-efficient graph representation

use std::collections::HashMap;
use std::mem;

use crate::graph::GraphError;

/// Compressed sparse representation of a directed graph.
///
/// Both edge directions are stored so that predecessor and successor lookups
/// are slices. Adjacency lists are sorted and free of duplicates.
#[derive(Debug, Clone)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's edges begin
    /// offsets[i] to offsets[i+1] defines the edge range for node i
    pub offsets: Vec<u32>,

    /// Edge array: concatenated lists of target nodes
    pub edges: Vec<u32>,

    /// Same layout as `offsets`, for incoming edges
    pub in_offsets: Vec<u32>,

    /// Concatenated lists of source nodes
    pub in_edges: Vec<u32>,

    /// Mapping from internal node IDs to original string IDs
    pub node_ids: Vec<String>,

    /// Reverse of `node_ids`
    pub id_to_index: HashMap<String, u32>,
}

impl CompressedGraph {
    /// Get outgoing edges for a node
    pub fn outgoing_edges(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Get incoming edges for a node
    pub fn incoming_edges(&self, node: usize) -> &[u32] {
        let start = self.in_offsets[node] as usize;
        let end = self.in_offsets[node + 1] as usize;
        &self.in_edges[start..end]
    }

    /// Check if there's an edge from src to dst
    #[cfg(test)]
    pub fn has_edge(&self, src: usize, dst: u32) -> bool {
        let edges = self.outgoing_edges(src);
        edges.binary_search(&dst).is_ok()
    }

    /// Get out-degree of a node
    pub fn out_degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    /// Get in-degree of a node
    pub fn in_degree(&self, node: usize) -> usize {
        let start = self.in_offsets[node] as usize;
        let end = self.in_offsets[node + 1] as usize;
        end - start
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Original string ID of a node
    pub fn node_id(&self, node: u32) -> &str {
        &self.node_ids[node as usize]
    }

    /// Internal index of a string ID, if present
    pub fn node_index(&self, id: &str) -> Option<u32> {
        self.id_to_index.get(id).copied()
    }

    /// Like `node_index`, but a missing node is an error
    pub fn require_node(&self, id: &str) -> Result<u32, GraphError> {
        self.node_index(id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = (self.offsets.capacity() + self.in_offsets.capacity()) * mem::size_of::<u32>();
        let edges = (self.edges.capacity() + self.in_edges.capacity()) * mem::size_of::<u32>();

        let ids = self.node_ids.iter().map(|s| s.capacity()).sum::<usize>();
        let index = self.id_to_index.capacity() * (mem::size_of::<String>() + mem::size_of::<u32>());

        base + offsets + edges + 2 * ids + index
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::GraphBuilder;

    #[test]
    fn forward_and_reverse_adjacency_agree() {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge("1", "2");
        builder.add_edge("1", "3");
        builder.add_edge("3", "2");
        builder.add_edge("2", "2");
        let graph = builder.build();

        for src in 0..graph.node_count {
            for &dst in graph.outgoing_edges(src) {
                assert!(graph.incoming_edges(dst as usize).contains(&(src as u32)));
            }
        }
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.in_edges.len(), 4);

        let two = graph.node_index("2").unwrap();
        assert_eq!(graph.in_degree(two as usize), 3);
        assert!(graph.has_edge(two as usize, two));
        assert!(graph.memory_usage() > 0);
    }

    #[test]
    fn missing_node_is_reported() {
        let graph = GraphBuilder::with_capacity(0).build();
        let err = graph.require_node("42").unwrap_err();
        assert_eq!(err.to_string(), "node not found in graph: 42");
    }
}
