//! Graph representation and algorithms module

pub mod compressed;
pub mod builder;
pub mod algorithms;

pub use compressed::CompressedGraph;
pub use builder::GraphBuilder;

use std::hash::Hash;

use petgraph::graph::{Graph, IndexType, NodeIndex};
use petgraph::{Directed, Direction};
use thiserror::Error;

/// Errors raised by graph loading and node lookups
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to read adjacency list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("node not found in graph: {0}")]
    UnknownNode(String),
}

/// Read access to a directed graph.
///
/// This is everything the centrality engine needs from a graph: the node set,
/// both neighbor directions, and both degrees. Degrees default to counting the
/// corresponding neighbor iterator; implementations with cheaper degree lookups
/// should override them.
pub trait DirectedGraph {
    /// Node handle, cheap to copy and usable as a map key
    type Node: Copy + Eq + Hash;

    /// All nodes in the graph
    fn nodes(&self) -> impl Iterator<Item = Self::Node> + '_;

    /// Nodes with an edge pointing to `node`
    fn predecessors(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Nodes `node` has an edge pointing to
    fn successors(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    fn in_degree(&self, node: Self::Node) -> usize {
        self.predecessors(node).count()
    }

    fn out_degree(&self, node: Self::Node) -> usize {
        self.successors(node).count()
    }
}

impl DirectedGraph for CompressedGraph {
    type Node = u32;

    fn nodes(&self) -> impl Iterator<Item = u32> + '_ {
        0..self.node_count as u32
    }

    fn predecessors(&self, node: u32) -> impl Iterator<Item = u32> + '_ {
        self.incoming_edges(node as usize).iter().copied()
    }

    fn successors(&self, node: u32) -> impl Iterator<Item = u32> + '_ {
        self.outgoing_edges(node as usize).iter().copied()
    }

    fn in_degree(&self, node: u32) -> usize {
        CompressedGraph::in_degree(self, node as usize)
    }

    fn out_degree(&self, node: u32) -> usize {
        CompressedGraph::out_degree(self, node as usize)
    }
}

// petgraph reports parallel edges once per edge, so multigraphs are counted as stored.
impl<N, E, Ix: IndexType> DirectedGraph for Graph<N, E, Directed, Ix> {
    type Node = NodeIndex<Ix>;

    fn nodes(&self) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        self.node_indices()
    }

    fn predecessors(&self, node: NodeIndex<Ix>) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        self.neighbors_directed(node, Direction::Incoming)
    }

    fn successors(&self, node: NodeIndex<Ix>) -> impl Iterator<Item = NodeIndex<Ix>> + '_ {
        self.neighbors_directed(node, Direction::Outgoing)
    }

    fn in_degree(&self, node: NodeIndex<Ix>) -> usize {
        self.edges_directed(node, Direction::Incoming).count()
    }

    fn out_degree(&self, node: NodeIndex<Ix>) -> usize {
        self.edges_directed(node, Direction::Outgoing).count()
    }
}
