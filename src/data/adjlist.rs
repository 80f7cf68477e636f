//! Adjacency-list file handling for graph data
//!
//! One line per node: the first token is the node, every following token is a
//! node it points to. Tokens are separated by whitespace or commas, `#` starts
//! a comment, and blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::graph::{CompressedGraph, GraphBuilder, GraphError};

/// Load a directed graph from an adjacency-list file
pub fn load_adjlist(path: impl AsRef<Path>) -> Result<CompressedGraph, GraphError> {
    let path = path.as_ref();
    log::info!("Reading adjacency list: {}", path.display());

    let io_err = |source| GraphError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let graph = parse_adjlist(BufReader::new(file)).map_err(io_err)?;

    log::info!(
        "Loaded graph with {} nodes and {} edges (~{} KiB)",
        graph.node_count,
        graph.edge_count(),
        graph.memory_usage() / 1024
    );

    Ok(graph)
}

/// Parse adjacency-list text from any buffered reader
pub fn parse_adjlist<R: BufRead>(reader: R) -> std::io::Result<CompressedGraph> {
    let mut builder = GraphBuilder::with_capacity(1024);

    for line in reader.lines() {
        let line = line?;
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };

        let mut tokens = content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty());

        let Some(node) = tokens.next() else {
            continue;
        };

        let src = builder.get_or_create_node(node);
        for neighbor in tokens {
            let dst = builder.get_or_create_node(neighbor);
            builder.add_edge_by_index(src, dst);
        }
    }

    log::debug!("Parsed {} nodes", builder.node_count());

    Ok(builder.build())
}
