//! Core library functions for the follow graph analyzer

pub mod centrality;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod data;
pub mod graph;
pub mod metadata;
pub mod stats;
pub mod storage;
pub mod viz;

pub use anyhow::{Result, anyhow};
pub use centrality::compute_ncc;
pub use cluster::{expand_clusters, InfluencerCluster};
pub use graph::{CompressedGraph, DirectedGraph};
