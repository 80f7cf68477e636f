//! Upstream user lookup API

use std::time::Duration;

use itertools::Itertools;
use serde::Deserialize;

use crate::metadata::{FetchedUser, MetadataError};

/// Batched user lookup by numeric ID
pub trait UserLookup {
    /// Fetch whichever of `uids` the upstream knows about
    fn lookup(&self, uids: &[u64]) -> Result<Vec<FetchedUser>, MetadataError>;
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    id: u64,
    screen_name: String,
    #[serde(default)]
    name: String,
}

/// Client for the Twitter v1.1 `users/lookup` endpoint
pub struct TwitterApi {
    agent: ureq::Agent,
    base_url: String,
    bearer_token: Option<String>,
}

impl TwitterApi {
    pub fn new(base_url: &str, bearer_token: Option<String>, timeout: Duration) -> Self {
        if bearer_token.is_none() {
            log::warn!("No API bearer token configured; user lookups will likely be rejected");
        }

        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token,
        }
    }
}

impl UserLookup for TwitterApi {
    fn lookup(&self, uids: &[u64]) -> Result<Vec<FetchedUser>, MetadataError> {
        let url = format!("{}/users/lookup.json", self.base_url);
        let ids = uids.iter().join(",");

        let mut request = self.agent.get(&url).query("user_id", &ids);
        if let Some(token) = &self.bearer_token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        let response = request
            .call()
            .map_err(|err| MetadataError::Http(format!("{url}: {err}")))?;

        let payload: Vec<serde_json::Value> = response.into_json()?;
        log::debug!("User lookup returned {} of {} users", payload.len(), uids.len());

        parse_users(payload)
    }
}

fn parse_users(payload: Vec<serde_json::Value>) -> Result<Vec<FetchedUser>, MetadataError> {
    payload
        .into_iter()
        .map(|value| {
            let raw_json = value.to_string();
            let user: ApiUser = serde_json::from_value(value)?;
            Ok(FetchedUser {
                uid: user.id,
                handle: user.screen_name,
                name: user.name,
                raw_json,
            })
        })
        .collect()
}
