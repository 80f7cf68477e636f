//! Command-line interface: argument definitions and command runners

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::centrality::{betweenness_centrality, compute_ncc, out_degree_centrality, rank_top};
use crate::cluster::{expand_clusters, metrics::cluster_metrics};
use crate::config::Config;
use crate::data::adjlist::load_adjlist;
use crate::data::preprocessing::sample_members;
use crate::graph::CompressedGraph;
use crate::metadata::{MetadataCache, SqliteStore, TwitterApi};
use crate::stats::GraphSummary;
use crate::{storage, viz};

#[derive(Parser, Debug)]
#[clap(
    name = "follow-graph-analyzer",
    about = "Analysis and visualization of follower graphs given as adjacency lists"
)]
pub struct Cli {
    /// Debug logging
    #[clap(long, global = true)]
    pub debug: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, global = true, default_value = "0")]
    pub threads: usize,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Basic analysis for a graph
    Analyze(AnalyzeArgs),
    /// Export a drawing of influencer clusters
    Draw(DrawArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Centrality {
    /// Out-degree centrality
    Degree,
    /// Neighbor cumulative degree centrality
    Ncc,
    /// Betweenness centrality (slow on large graphs)
    Betweenness,
}

impl Centrality {
    fn title(self) -> &'static str {
        match self {
            Centrality::Degree => "out-degree",
            Centrality::Ncc => "neighbor cumulative degree",
            Centrality::Betweenness => "betweenness",
        }
    }
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to an adjacency list
    pub filename: PathBuf,

    /// Print simple whole-graph statistics
    #[clap(long)]
    pub summary: bool,

    /// Rank nodes by this centrality measure
    #[clap(long, value_enum)]
    pub centrality: Option<Centrality>,

    /// Use the predecessor/out-degree variant of NCC
    #[clap(long)]
    pub ncc_in_degree: bool,

    /// Write in- and out-degree histograms next to the input
    #[clap(long)]
    pub degreedist: bool,

    /// Human-oriented output with headings and scores
    #[clap(long)]
    pub verbose: bool,

    /// JSON output (ignored with --verbose)
    #[clap(long)]
    pub json: bool,

    /// Number of top-ranked nodes to report
    #[clap(long)]
    pub nnodes: Option<usize>,

    /// Expand clusters this many hops around the top-ranked nodes
    #[clap(long, default_value = "0")]
    pub influencer_cluster_dist: usize,

    /// Also write the cluster mapping to this file
    #[clap(long)]
    pub clusters_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DrawArgs {
    /// Path to an adjacency list
    pub filename: PathBuf,

    /// Cluster mapping written by `analyze --json` or `--clusters-out`
    #[clap(long)]
    pub clusters: PathBuf,

    /// Fraction of each cluster's members to keep
    #[clap(long, default_value = "1.0")]
    pub sample: f64,

    /// Seed for member sampling
    #[clap(long)]
    pub seed: Option<u64>,

    /// Output directory for the exported drawing
    #[clap(long, default_value = "cluster_drawing")]
    pub output_dir: PathBuf,

    /// Label influencers with names from the metadata cache
    #[clap(long)]
    pub resolve_names: bool,

    /// Metadata cache database (overrides the configured path)
    #[clap(long)]
    pub metadata_db: Option<PathBuf>,
}

/// Output mode; verbose wins over JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Plain,
    Verbose,
    Json,
}

impl AnalyzeArgs {
    fn output(&self) -> Output {
        if self.verbose {
            Output::Verbose
        } else if self.json {
            Output::Json
        } else {
            Output::Plain
        }
    }
}

/// Run `analyze`, writing the report to `out`
pub fn run_analyze(args: &AnalyzeArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    let graph = load_adjlist(&args.filename)?;
    let output = args.output();
    let nnodes = args.nnodes.unwrap_or(config.nnodes);

    if args.summary {
        writeln!(out, "{}", GraphSummary::compute(&graph))?;
    }

    let central_users = match args.centrality {
        Some(measure) => {
            log::info!("Ranking nodes by {} centrality", measure.title());
            if output == Output::Verbose {
                writeln!(out, "Most central users by {} centrality", measure.title())?;
            }
            let mut report = RankingReport {
                graph: &graph,
                output,
                emit_json: args.influencer_cluster_dist == 0,
                out: &mut *out,
            };
            match measure {
                Centrality::Degree => {
                    let scores = out_degree_centrality(&graph).into_iter().enumerate().map(|(n, s)| (n as u32, s));
                    report.emit(rank_top(scores, nnodes))?
                }
                Centrality::Ncc => report.emit(rank_top(compute_ncc(&graph, args.ncc_in_degree), nnodes))?,
                Centrality::Betweenness => {
                    let scores = betweenness_centrality(&graph).into_iter().enumerate().map(|(n, s)| (n as u32, s));
                    report.emit(rank_top(scores, nnodes))?
                }
            }
        }
        None => Vec::new(),
    };

    if args.influencer_cluster_dist != 0 {
        write_clusters(args, config, &graph, &central_users, output, out)?;
    }

    if args.degreedist {
        viz::write_degree_histograms(&graph, &args.filename)?;
    }

    Ok(())
}

/// Prints a ranking in the selected output mode
struct RankingReport<'a, W: Write> {
    graph: &'a CompressedGraph,
    output: Output,
    /// JSON rankings are only printed when no cluster mapping follows
    emit_json: bool,
    out: &'a mut W,
}

impl<W: Write> RankingReport<'_, W> {
    fn emit<S: Serialize + Copy>(&mut self, ranked: Vec<(u32, S)>) -> Result<Vec<u32>> {
        match self.output {
            // Verbose mode differs only by the heading printed before this
            Output::Plain | Output::Verbose => {
                for &(node, _) in &ranked {
                    writeln!(self.out, "{}", self.graph.node_id(node))?;
                }
            }
            Output::Json if self.emit_json => {
                let value = storage::ranking_to_json(self.graph, &ranked)?;
                writeln!(self.out, "{}", serde_json::to_string(&value)?)?;
            }
            Output::Json => {}
        }

        Ok(ranked.into_iter().map(|(node, _)| node).collect())
    }
}

fn write_clusters(
    args: &AnalyzeArgs,
    config: &Config,
    graph: &CompressedGraph,
    central_users: &[u32],
    output: Output,
    out: &mut impl Write,
) -> Result<()> {
    let radius = args.influencer_cluster_dist;
    if central_users.is_empty() {
        log::warn!("Influencer clusters need ranked nodes; pass --centrality");
    }
    if radius > config.cluster_radius_warning {
        log::warn!(
            "Cluster radius {} may be slow: expansion cost grows with every hop on dense graphs",
            radius
        );
    }

    let clusters = expand_clusters(graph, central_users, radius);
    let mapping = storage::clusters_to_json(graph, &clusters);

    match output {
        Output::Verbose => {
            writeln!(out, "Influencer clusters of degree {}: ", radius)?;
            for cluster in &clusters {
                let metrics = cluster_metrics(graph, cluster);
                let mut members: Vec<&str> = cluster.members.iter().map(|&n| graph.node_id(n)).collect();
                members.sort_unstable();
                writeln!(out, "{} ({}): {}", metrics.seed, metrics.size, members.join(" "))?;
                log::debug!("Cluster {} density {:.4}", metrics.seed, metrics.density);
            }
        }
        Output::Json => writeln!(out, "{}", serde_json::to_string(&mapping)?)?,
        Output::Plain => {}
    }

    if let Some(path) = &args.clusters_out {
        storage::save_clusters(&mapping, path)?;
    }

    Ok(())
}

/// Run `draw`
pub fn run_draw(args: &DrawArgs, config: &Config) -> Result<()> {
    if !(0.0..=1.0).contains(&args.sample) {
        bail!("--sample must be between 0.0 and 1.0, got {}", args.sample);
    }

    let graph = load_adjlist(&args.filename)?;
    let mut clusters = storage::load_clusters(&args.clusters)?;

    if args.sample < 1.0 {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        for (seed, members) in &mut clusters {
            *members = sample_members(members, args.sample, &mut rng);
            log::debug!("Sampled cluster {} down to {} members", seed, members.len());
        }
    }

    let labels = if args.resolve_names {
        let seeds: Vec<String> = clusters.iter().map(|(seed, _)| seed.clone()).collect();
        resolve_labels(&seeds, config, args.metadata_db.clone())?
    } else {
        HashMap::new()
    };

    viz::export_cluster_drawing(&graph, &clusters, &labels, &args.output_dir)
}

/// Display names for numeric IDs; other IDs are left out and keep their raw form
fn resolve_labels(
    ids: &[String],
    config: &Config,
    metadata_db: Option<PathBuf>,
) -> Result<HashMap<String, String>> {
    let numeric: Vec<u64> = ids.iter().filter_map(|id| id.parse().ok()).collect();
    if numeric.len() < ids.len() {
        log::warn!("{} cluster seeds are not numeric user IDs", ids.len() - numeric.len());
    }
    if numeric.is_empty() {
        return Ok(HashMap::new());
    }

    let db_path = metadata_db.unwrap_or_else(|| config.metadata_db.clone());
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open metadata cache {}", db_path.display()))?;
    let api = TwitterApi::new(&config.api_base_url, config.bearer_token.clone(), config.api_timeout);
    let mut cache = MetadataCache::new(store, api, config.metadata_batch_size);

    let names = cache.user_names(&numeric)?;
    Ok(names.into_iter().map(|(uid, name)| (uid.to_string(), name)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_beats_json() {
        let cli = Cli::parse_from(["follow-graph-analyzer", "analyze", "g.adjlist", "--verbose", "--json"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.output(), Output::Verbose);
    }

    #[test]
    fn parses_centrality_and_cluster_flags() {
        let cli = Cli::parse_from([
            "follow-graph-analyzer",
            "--threads",
            "2",
            "analyze",
            "g.adjlist",
            "--centrality",
            "ncc",
            "--nnodes",
            "3",
            "--influencer-cluster-dist",
            "2",
        ]);
        assert_eq!(cli.threads, 2);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.centrality, Some(Centrality::Ncc));
        assert_eq!(args.nnodes, Some(3));
        assert_eq!(args.influencer_cluster_dist, 2);
        assert_eq!(args.output(), Output::Plain);
    }

    #[test]
    fn rejects_out_of_range_sample() {
        let args = DrawArgs {
            filename: PathBuf::from("unused"),
            clusters: PathBuf::from("unused"),
            sample: 1.5,
            seed: None,
            output_dir: PathBuf::from("unused"),
            resolve_names: false,
            metadata_db: None,
        };
        let err = run_draw(&args, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("--sample"));
    }
}
