//! User metadata lookups
//!
//! Resolves numeric user IDs to display names and handles. Records are read
//! from a local store first; misses go to the upstream user lookup API in
//! fixed-size batches and the results are written back to the store.
//!
//! A batch the API fails on does not fail the lookup: every ID in that batch
//! resolves to its own decimal string and the remaining batches still run.
//! Store failures do propagate.

pub mod api;
pub mod store;

pub use api::{TwitterApi, UserLookup};
pub use store::{MetadataStore, SqliteStore};

use std::collections::{HashMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("user lookup request failed: {0}")]
    Http(String),

    #[error("failed to decode user lookup response: {0}")]
    Decode(#[from] std::io::Error),

    #[error("malformed user record: {0}")]
    Json(#[from] serde_json::Error),
}

/// A user as returned by the lookup API
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedUser {
    pub uid: u64,
    pub handle: String,
    pub name: String,
    /// Full upstream payload, kept for later use
    pub raw_json: String,
}

/// A persisted user record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uid: u64,
    pub handle: String,
    pub name: String,
    /// Seconds since the Unix epoch when the API returned this record
    pub lookup_time: f64,
    pub additional_metadata: Option<String>,
}

impl UserRecord {
    fn from_fetched(user: FetchedUser, lookup_time: f64) -> Self {
        Self {
            uid: user.uid,
            handle: user.handle,
            name: user.name,
            lookup_time,
            additional_metadata: Some(user.raw_json),
        }
    }

    /// Display name, falling back to the handle, then to the ID
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            self.name.clone()
        } else if !self.handle.is_empty() {
            self.handle.clone()
        } else {
            self.uid.to_string()
        }
    }

    /// Handle, falling back to the ID
    pub fn display_handle(&self) -> String {
        if self.handle.is_empty() {
            self.uid.to_string()
        } else {
            self.handle.clone()
        }
    }
}

/// Read-through cache over a metadata store and a lookup API.
///
/// Both collaborators are injected so tests can substitute fakes.
pub struct MetadataCache<S, L> {
    store: S,
    api: L,
    batch_size: usize,
}

impl<S: MetadataStore, L: UserLookup> MetadataCache<S, L> {
    pub fn new(store: S, api: L, batch_size: usize) -> Self {
        Self {
            store,
            api,
            batch_size: batch_size.max(1),
        }
    }

    /// Map every requested ID to a display name
    pub fn user_names(&mut self, uids: &[u64]) -> Result<HashMap<u64, String>, MetadataError> {
        self.resolve_with(uids, UserRecord::display_name)
    }

    /// Map every requested ID to a handle
    pub fn handles(&mut self, uids: &[u64]) -> Result<HashMap<u64, String>, MetadataError> {
        self.resolve_with(uids, UserRecord::display_handle)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn resolve_with(
        &mut self,
        uids: &[u64],
        render: fn(&UserRecord) -> String,
    ) -> Result<HashMap<u64, String>, MetadataError> {
        let resolved = self.resolve(uids)?;
        Ok(resolved
            .into_iter()
            .map(|(uid, record)| {
                let label = record.as_ref().map_or_else(|| uid.to_string(), render);
                (uid, label)
            })
            .collect())
    }

    /// Look up every ID, returning `None` for IDs nothing is known about
    fn resolve(&mut self, uids: &[u64]) -> Result<HashMap<u64, Option<UserRecord>>, MetadataError> {
        let mut seen = HashSet::with_capacity(uids.len());
        let unique: Vec<u64> = uids.iter().copied().filter(|uid| seen.insert(*uid)).collect();

        let cached = self.store.load(&unique)?;
        let mut results: HashMap<u64, Option<UserRecord>> = cached
            .into_iter()
            .map(|(uid, record)| (uid, Some(record)))
            .collect();

        let remaining: Vec<u64> = unique
            .into_iter()
            .filter(|uid| !results.contains_key(uid))
            .collect();
        if remaining.is_empty() {
            return Ok(results);
        }

        log::info!(
            "{} of {} users cached, fetching {} in batches of {}",
            results.len(),
            seen.len(),
            remaining.len(),
            self.batch_size
        );

        let lookup_time = unix_now();
        for (index, batch) in remaining.chunks(self.batch_size).enumerate() {
            let users = match self.api.lookup(batch) {
                Ok(users) => users,
                Err(err) => {
                    log::warn!("User lookup failed for batch {} ({} ids): {}", index, batch.len(), err);
                    for &uid in batch {
                        results.insert(uid, None);
                    }
                    continue;
                }
            };

            let requested: HashSet<u64> = batch.iter().copied().collect();
            let records: Vec<UserRecord> = users
                .into_iter()
                .filter(|user| requested.contains(&user.uid))
                .map(|user| UserRecord::from_fetched(user, lookup_time))
                .collect();

            self.store.save(&records)?;

            for record in records {
                results.insert(record.uid, Some(record));
            }
            for &uid in batch {
                results.entry(uid).or_insert_with(|| {
                    log::debug!("No upstream record for user {}", uid);
                    None
                });
            }
        }

        Ok(results)
    }
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
