//! Visualization generation module
//!
//! Nothing here renders images. Histograms are written as CSV and cluster
//! drawings as GraphML with per-node color hints, for external plotting tools.

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cluster::metrics::calculate_density;
use crate::data::preprocessing::induced_subgraph;
use crate::graph::CompressedGraph;
use crate::stats::{degree_histogram, in_degrees, out_degrees};

/// Cluster colors, cycled by cluster position (red, green, blue, black)
const COLORS: [&str; 4] = ["#ff0000", "#008000", "#0000ff", "#000000"];

/// Write in- and out-degree histograms next to the input file.
///
/// For `graphs/follows.adjlist` this produces
/// `graphs/follows_indegree_hist.csv` and `graphs/follows_outdegree_hist.csv`.
pub fn write_degree_histograms(graph: &CompressedGraph, input: &Path) -> Result<(PathBuf, PathBuf)> {
    let in_path = sibling_path(input, "_indegree_hist.csv");
    let out_path = sibling_path(input, "_outdegree_hist.csv");

    write_histogram(&in_path, "in_degree", &degree_histogram(&in_degrees(graph)))?;
    write_histogram(&out_path, "out_degree", &degree_histogram(&out_degrees(graph)))?;

    log::info!("Wrote degree histograms to {} and {}", in_path.display(), out_path.display());

    Ok((in_path, out_path))
}

fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    input.with_file_name(format!("{stem}{suffix}"))
}

fn write_histogram(path: &Path, column: &str, buckets: &[usize]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{column},count")?;
    for (degree, count) in buckets.iter().enumerate() {
        writeln!(writer, "{degree},{count}")?;
    }
    writer.flush()?;

    Ok(())
}

/// Export the subgraph spanned by a set of influencer clusters.
///
/// `clusters` maps seed IDs to member IDs in drawing order; `labels` supplies
/// display names for seeds. A seed missing from the graph is an error; missing
/// members are skipped with a warning. Writes `clusters.graphml` and
/// `nodes.csv` into `output_dir`.
pub fn export_cluster_drawing(
    graph: &CompressedGraph,
    clusters: &[(String, Vec<String>)],
    labels: &HashMap<String, String>,
    output_dir: &Path,
) -> Result<()> {
    log::info!("Exporting drawing of {} clusters", clusters.len());
    fs::create_dir_all(output_dir)?;

    // Node index -> position of the first cluster it belongs to
    let mut assignment: HashMap<u32, usize> = HashMap::new();
    let mut influencers: HashSet<u32> = HashSet::new();

    for (position, (seed, members)) in clusters.iter().enumerate() {
        let seed_node = graph.require_node(seed)?;
        influencers.insert(seed_node);
        // Seeds always take their own cluster's color
        assignment.insert(seed_node, position);

        let mut member_set = HashSet::with_capacity(members.len() + 1);
        member_set.insert(seed_node);
        for id in members {
            match graph.node_index(id) {
                Some(node) => {
                    if !influencers.contains(&node) {
                        assignment.entry(node).or_insert(position);
                    }
                    member_set.insert(node);
                }
                None => log::warn!("Skipping {} from cluster {}: not in graph", id, seed),
            }
        }

        log::info!(
            "Cluster {}: {} nodes, density {:.4}",
            seed,
            member_set.len(),
            calculate_density(graph, &member_set)
        );
    }

    let union: HashSet<u32> = assignment.keys().copied().collect();
    let subgraph = induced_subgraph(graph, &union);

    write_graphml(graph, &subgraph, &assignment, &influencers, labels, &output_dir.join("clusters.graphml"))?;
    write_nodes_csv(graph, &subgraph, &assignment, &influencers, labels, &output_dir.join("nodes.csv"))?;

    log::info!(
        "Drawing exported: {} nodes, {} edges",
        subgraph.node_count,
        subgraph.edge_count()
    );

    Ok(())
}

fn node_label<'a>(id: &'a str, labels: &'a HashMap<String, String>) -> &'a str {
    labels.get(id).map(String::as_str).unwrap_or(id)
}

fn write_graphml(
    graph: &CompressedGraph,
    subgraph: &CompressedGraph,
    assignment: &HashMap<u32, usize>,
    influencers: &HashSet<u32>,
    labels: &HashMap<String, String>,
    path: &Path,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut file = BufWriter::new(file);

    // Write GraphML header
    writeln!(file, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(file, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">")?;
    writeln!(file, "  <key id=\"label\" for=\"node\" attr.name=\"label\" attr.type=\"string\"/>")?;
    writeln!(file, "  <key id=\"cluster\" for=\"node\" attr.name=\"cluster\" attr.type=\"int\"/>")?;
    writeln!(file, "  <key id=\"influencer\" for=\"node\" attr.name=\"influencer\" attr.type=\"boolean\"/>")?;
    writeln!(file, "  <key id=\"color\" for=\"node\" attr.name=\"color\" attr.type=\"string\"/>")?;
    writeln!(file, "  <graph id=\"G\" edgedefault=\"directed\">")?;

    for sub_node in 0..subgraph.node_count as u32 {
        let id = subgraph.node_id(sub_node);
        let Some(node) = graph.node_index(id) else {
            continue;
        };
        let cluster = assignment.get(&node).copied().unwrap_or(0);
        let is_influencer = influencers.contains(&node);
        let label = if is_influencer { node_label(id, labels) } else { id };

        writeln!(file, "    <node id=\"n{}\">", sub_node)?;
        writeln!(file, "      <data key=\"label\">{}</data>", escape_xml(label))?;
        writeln!(file, "      <data key=\"cluster\">{}</data>", cluster)?;
        writeln!(file, "      <data key=\"influencer\">{}</data>", is_influencer)?;
        writeln!(file, "      <data key=\"color\">{}</data>", COLORS[cluster % COLORS.len()])?;
        writeln!(file, "    </node>")?;
    }

    let mut edge_id = 0;
    for src in 0..subgraph.node_count {
        for &dst in subgraph.outgoing_edges(src) {
            writeln!(file, "    <edge id=\"e{}\" source=\"n{}\" target=\"n{}\"/>", edge_id, src, dst)?;
            edge_id += 1;
        }
    }

    // Write GraphML footer
    writeln!(file, "  </graph>")?;
    writeln!(file, "</graphml>")?;
    file.flush()?;

    Ok(())
}

fn write_nodes_csv(
    graph: &CompressedGraph,
    subgraph: &CompressedGraph,
    assignment: &HashMap<u32, usize>,
    influencers: &HashSet<u32>,
    labels: &HashMap<String, String>,
    path: &Path,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut file = BufWriter::new(file);

    writeln!(file, "id,label,cluster,influencer")?;
    for sub_node in 0..subgraph.node_count as u32 {
        let id = subgraph.node_id(sub_node);
        let Some(node) = graph.node_index(id) else {
            continue;
        };
        let is_influencer = influencers.contains(&node);
        let label = if is_influencer { node_label(id, labels) } else { id };

        writeln!(
            file,
            "{},{},{},{}",
            escape_csv(id),
            escape_csv(label),
            assignment.get(&node).copied().unwrap_or(0),
            is_influencer
        )?;
    }
    file.flush()?;

    Ok(())
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
