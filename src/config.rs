//! Configuration management for the follow graph analyzer

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the metadata database path
pub const METADATA_DB_ENV: &str = "FOLLOWGRAPH_METADATA_DB";

/// Environment variable overriding the lookup API base URL
pub const API_URL_ENV: &str = "FOLLOWGRAPH_API_URL";

/// Environment variable holding the lookup API bearer token
pub const BEARER_TOKEN_ENV: &str = "TWITTER_BEARER_TOKEN";

/// Runtime configuration for the follow graph analyzer
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of top-ranked nodes to report
    pub nnodes: usize,

    /// Cluster radius above which expansion logs a cost warning
    pub cluster_radius_warning: usize,

    /// IDs per upstream user lookup request
    pub metadata_batch_size: usize,

    /// SQLite file backing the metadata cache
    pub metadata_db: PathBuf,

    /// Base URL of the user lookup API
    pub api_base_url: String,

    /// Bearer token for the user lookup API
    pub bearer_token: Option<String>,

    /// Per-request timeout for the user lookup API
    pub api_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nnodes: 10,
            cluster_radius_warning: 3,
            metadata_batch_size: 100,
            metadata_db: PathBuf::from("metadata.db"),
            api_base_url: "https://api.twitter.com/1.1".to_string(),
            bearer_token: None,
            api_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Defaults overlaid with whatever the environment sets
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(METADATA_DB_ENV) {
            self.metadata_db = PathBuf::from(path);
        }
        if let Some(url) = lookup(API_URL_ENV) {
            self.api_base_url = url;
        }
        self.bearer_token = lookup(BEARER_TOKEN_ENV).filter(|t| !t.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_cli_expectations() {
        let config = Config::default();
        assert_eq!(config.nnodes, 10);
        assert_eq!(config.metadata_batch_size, 100);
        assert_eq!(config.metadata_db, PathBuf::from("metadata.db"));
        assert!(config.bearer_token.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            (METADATA_DB_ENV, "/tmp/users.db"),
            (BEARER_TOKEN_ENV, "secret"),
        ]);
        let config = Config::default().with_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.metadata_db, PathBuf::from("/tmp/users.db"));
        assert_eq!(config.bearer_token.as_deref(), Some("secret"));
        assert_eq!(config.api_base_url, "https://api.twitter.com/1.1");
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let config = Config::default().with_overrides(|key| {
            (key == BEARER_TOKEN_ENV).then(String::new)
        });
        assert!(config.bearer_token.is_none());
    }
}
