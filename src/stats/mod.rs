//! Summary statistics and degree distributions

use std::fmt;

use statrs::statistics::{Data, Median};

use crate::graph::algorithms::weakly_connected_components;
use crate::graph::CompressedGraph;

/// Number of component sizes reported in a summary
const TOP_COMPONENTS: usize = 10;

/// Simple whole-graph statistics
#[derive(Debug, Clone)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
    /// Largest weakly connected component sizes, descending
    pub largest_components: Vec<usize>,
    pub avg_in_degree: f64,
    pub median_in_degree: f64,
    pub avg_out_degree: f64,
    pub median_out_degree: f64,
}

impl GraphSummary {
    pub fn compute(graph: &CompressedGraph) -> Self {
        let components = weakly_connected_components(graph);
        let in_degrees = in_degrees(graph);
        let out_degrees = out_degrees(graph);

        Self {
            node_count: graph.node_count,
            edge_count: graph.edge_count(),
            component_count: components.len(),
            largest_components: components.iter().take(TOP_COMPONENTS).map(|c| c.len()).collect(),
            avg_in_degree: mean(&in_degrees),
            median_in_degree: median(&in_degrees),
            avg_out_degree: mean(&out_degrees),
            median_out_degree: median(&out_degrees),
        }
    }
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of nodes: {}", self.node_count)?;
        writeln!(f, "Number of edges: {}", self.edge_count)?;
        writeln!(f, "Number of connected components (ignoring direction): {}", self.component_count)?;
        writeln!(f, "Size of connected components (ignoring direction): {:?}", self.largest_components)?;
        writeln!(f, "Average in-degree: {}", self.avg_in_degree)?;
        writeln!(f, "Median in-degree: {}", self.median_in_degree)?;
        writeln!(f, "Average out-degree: {}", self.avg_out_degree)?;
        write!(f, "Median out-degree: {}", self.median_out_degree)
    }
}

pub fn in_degrees(graph: &CompressedGraph) -> Vec<usize> {
    (0..graph.node_count).map(|n| graph.in_degree(n)).collect()
}

pub fn out_degrees(graph: &CompressedGraph) -> Vec<usize> {
    (0..graph.node_count).map(|n| graph.out_degree(n)).collect()
}

fn mean(values: &[usize]) -> f64 {
    use statrs::statistics::Statistics;
    values.iter().map(|&v| v as f64).mean()
}

fn median(values: &[usize]) -> f64 {
    Data::new(values.iter().map(|&v| v as f64).collect::<Vec<_>>()).median()
}

/// Count nodes per degree value.
///
/// Bucket `i` holds the nodes of degree `i`, for every degree from zero up to
/// the largest one seen. Empty for an empty graph.
pub fn degree_histogram(degrees: &[usize]) -> Vec<usize> {
    let Some(&max) = degrees.iter().max() else {
        return Vec::new();
    };

    let mut buckets = vec![0; max + 1];
    for &degree in degrees {
        buckets[degree] += 1;
    }
    buckets
}
