// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! The persistent repository catalog
//!
//! One SQLite table keyed by absolute path. Each upsert is its own
//! autocommit transaction; WAL mode lets readers proceed during a write.

use crate::types::{RepoRecord, ScannedRepo};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS repos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    path TEXT NOT NULL UNIQUE,
    size_bytes INTEGER NOT NULL,
    mtime INTEGER NOT NULL,
    remote_url TEXT
);
";

/// Errors surfaced by the catalog store.
///
/// An open failure is fatal at process start: callers must not continue with
/// a half-initialized store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Data directory could not be created
    #[error("failed to create data directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// Any underlying SQLite failure
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// Handle to the catalog database, held for the process lifetime.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open or create the catalog database at `path`. Enables WAL mode.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "wal")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Open an in-memory catalog (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert the repository, or replace every field but `id` when a record
    /// with the same path already exists. Returns the record's id.
    pub fn upsert(&self, repo: &ScannedRepo) -> Result<i64, StoreError> {
        let path = repo.path.to_string_lossy();
        self.conn.execute(
            "INSERT INTO repos (name, path, size_bytes, mtime, remote_url)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(path) DO UPDATE SET
                 name = excluded.name,
                 size_bytes = excluded.size_bytes,
                 mtime = excluded.mtime,
                 remote_url = excluded.remote_url",
            rusqlite::params![
                repo.name,
                path,
                repo.size_bytes as i64,
                repo.mtime,
                repo.remote_url,
            ],
        )?;

        // Query for the canonical id: last_insert_rowid is not reliable
        // on the conflict path.
        let id: i64 = self.conn.query_row(
            "SELECT id FROM repos WHERE path = ?1",
            [path.as_ref()],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Every record, most recently modified first; ties fall back to
    /// insertion order.
    pub fn list_all(&self) -> Result<Vec<RepoRecord>, StoreError> {
        self.query(
            "SELECT id, name, path, size_bytes, mtime, remote_url
             FROM repos ORDER BY mtime DESC, id ASC",
            rusqlite::params![],
        )
    }

    /// Case-insensitive substring match of `query` against name or path,
    /// ordered like [`CatalogStore::list_all`]. An empty query lists
    /// everything.
    pub fn search(&self, query: &str) -> Result<Vec<RepoRecord>, StoreError> {
        if query.is_empty() {
            return self.list_all();
        }
        let like = format!("%{}%", query.to_lowercase());
        self.query(
            "SELECT id, name, path, size_bytes, mtime, remote_url
             FROM repos
             WHERE lower(name) LIKE ?1 OR lower(path) LIKE ?1
             ORDER BY mtime DESC, id ASC",
            rusqlite::params![like],
        )
    }

    fn query<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<RepoRecord>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| {
            Ok(RepoRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                path: row.get(2)?,
                size_bytes: row.get::<_, i64>(3)?.max(0) as u64,
                mtime: row.get(4)?,
                remote_url: row.get(5)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}
