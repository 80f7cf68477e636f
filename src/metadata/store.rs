//! Persistent user metadata store

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, params_from_iter, Connection};

use crate::metadata::{MetadataError, UserRecord};

/// SQLite caps bound parameters per statement; stay well below it
const MAX_IDS_PER_QUERY: usize = 500;

/// Storage for user records keyed by user ID
pub trait MetadataStore {
    /// Records for whichever of `uids` are stored
    fn load(&self, uids: &[u64]) -> Result<HashMap<u64, UserRecord>, MetadataError>;

    /// Insert or replace records
    fn save(&mut self, records: &[UserRecord]) -> Result<(), MetadataError>;
}

/// `MetadataStore` backed by a single SQLite table
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        log::debug!("Opening metadata store at {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, MetadataError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, MetadataError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS twitter_user (
                uid INTEGER PRIMARY KEY,
                handle TEXT NOT NULL,
                name TEXT NOT NULL,
                api_lookup_time REAL NOT NULL,
                additional_metadata TEXT
            )",
        )?;
        Ok(Self { conn })
    }
}

impl MetadataStore for SqliteStore {
    fn load(&self, uids: &[u64]) -> Result<HashMap<u64, UserRecord>, MetadataError> {
        let mut records = HashMap::with_capacity(uids.len());

        for chunk in uids.chunks(MAX_IDS_PER_QUERY) {
            let placeholders = vec!["?"; chunk.len()].join(",");
            let sql = format!(
                "SELECT uid, handle, name, api_lookup_time, additional_metadata
                 FROM twitter_user WHERE uid IN ({placeholders})"
            );

            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter().map(|&uid| uid as i64)), |row| {
                Ok(UserRecord {
                    uid: row.get::<_, i64>(0)? as u64,
                    handle: row.get(1)?,
                    name: row.get(2)?,
                    lookup_time: row.get(3)?,
                    additional_metadata: row.get(4)?,
                })
            })?;

            for record in rows {
                let record = record?;
                records.insert(record.uid, record);
            }
        }

        Ok(records)
    }

    fn save(&mut self, records: &[UserRecord]) -> Result<(), MetadataError> {
        if records.is_empty() {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO twitter_user
                 (uid, handle, name, api_lookup_time, additional_metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.uid as i64,
                    record.handle,
                    record.name,
                    record.lookup_time,
                    record.additional_metadata,
                ])?;
            }
        }
        tx.commit()?;

        log::debug!("Stored {} user records", records.len());
        Ok(())
    }
}
