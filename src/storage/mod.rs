//! Results persistence module
//!
//! Influencer clusters are exchanged as a JSON object mapping each seed ID to
//! the list of its member IDs, in ranking order.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::cluster::InfluencerCluster;
use crate::graph::CompressedGraph;

/// One ranked node as written to JSON
#[derive(Debug, Clone, Serialize)]
pub struct RankedNode<'a, S> {
    pub node: &'a str,
    pub score: S,
}

/// Ranking as a JSON array of `{node, score}` objects
pub fn ranking_to_json<S: Serialize + Copy>(graph: &CompressedGraph, ranked: &[(u32, S)]) -> Result<Value> {
    let rows: Vec<RankedNode<'_, S>> = ranked
        .iter()
        .map(|&(node, score)| RankedNode {
            node: graph.node_id(node),
            score,
        })
        .collect();

    Ok(serde_json::to_value(rows)?)
}

/// Cluster mapping as JSON, members sorted by ID
pub fn clusters_to_json(graph: &CompressedGraph, clusters: &[InfluencerCluster<u32>]) -> Value {
    let mut mapping = Map::with_capacity(clusters.len());
    for cluster in clusters {
        let mut members: Vec<&str> = cluster.members.iter().map(|&n| graph.node_id(n)).collect();
        members.sort_unstable();
        mapping.insert(
            graph.node_id(cluster.seed).to_string(),
            Value::from(members),
        );
    }
    Value::Object(mapping)
}

/// Write a cluster mapping to `path`
pub fn save_clusters(clusters: &Value, path: &Path) -> Result<()> {
    log::info!("Saving clusters to {}", path.display());

    let mut file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(serde_json::to_string_pretty(clusters)?.as_bytes())?;

    Ok(())
}

/// Read a cluster mapping written by `save_clusters`, keeping seed order
pub fn load_clusters(path: &Path) -> Result<Vec<(String, Vec<String>)>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open cluster file {}", path.display()))?;
    let mapping: Map<String, Value> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a JSON object of seed -> members", path.display()))?;

    mapping
        .into_iter()
        .map(|(seed, members)| {
            let members: Vec<String> = serde_json::from_value(members)
                .with_context(|| format!("members of cluster {seed} must be a list of strings"))?;
            Ok((seed, members))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::expand_clusters;
    use crate::graph::GraphBuilder;
    use serde_json::json;

    fn graph() -> CompressedGraph {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge("d", "c");
        builder.add_edge("a", "b");
        builder.add_edge("b", "c");
        builder.build()
    }

    #[test]
    fn clusters_serialize_in_seed_order() {
        let graph = graph();
        let seeds = [graph.node_index("d").unwrap(), graph.node_index("a").unwrap()];
        let clusters = expand_clusters(&graph, &seeds, 2);

        let value = clusters_to_json(&graph, &clusters);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"d":["c","d"],"a":["a","b","c"]}"#
        );
    }

    #[test]
    fn ranking_serializes_ids_and_scores() {
        let graph = graph();
        let value = ranking_to_json(&graph, &[(2, 4u64), (0, 1)]).unwrap();
        assert_eq!(value, json!([{"node": "a", "score": 4}, {"node": "d", "score": 1}]));
    }

    #[test]
    fn saved_clusters_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clusters.json");
        save_clusters(&json!({"z": ["z", "y"], "a": ["a"]}), &path).unwrap();

        let loaded = load_clusters(&path).unwrap();
        assert_eq!(
            loaded,
            vec![
                ("z".to_string(), vec!["z".to_string(), "y".to_string()]),
                ("a".to_string(), vec!["a".to_string()]),
            ]
        );
    }

    #[test]
    fn rejects_non_list_members() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"a": 3}"#).unwrap();

        let err = load_clusters(&path).unwrap_err();
        assert!(format!("{err:#}").contains("members of cluster a"));
    }
}
