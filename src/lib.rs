// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//
//! Repovault library - local repository catalog, search and archiving
//!
//! This crate provides the core functionality for cataloging git
//! repositories found under arbitrary filesystem roots: discovery,
//! metadata extraction, an incremental persistent store, selective
//! archiving and preview-image selection.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod commands;
pub mod config;
pub mod preview;
pub mod remote;
pub mod scanner;
pub mod store;

/// Core data types for the catalog
pub mod types {
    use chrono::{Local, TimeZone};
    use serde::Serialize;
    use std::path::PathBuf;

    // =========================================================================
    // RepoRecord (persisted)
    // =========================================================================

    /// A cataloged repository as persisted in the store.
    ///
    /// `path` is the unique key of the catalog; `id` is a surrogate key that
    /// stays stable across rescans of the same path.
    #[derive(Debug, Clone, Serialize)]
    pub struct RepoRecord {
        /// Store-assigned surrogate key, stable once created
        pub id: i64,
        /// Directory base name (display only, not unique)
        pub name: String,
        /// Absolute filesystem path; unique key of the catalog
        pub path: String,
        /// Total bytes of tracked files, `.git` subtree excluded at scan time
        pub size_bytes: u64,
        /// Unix timestamp of the repository root's last modification
        pub mtime: i64,
        /// Origin remote URL, absent when none is configured or discoverable
        pub remote_url: Option<String>,
    }

    impl RepoRecord {
        /// Size rendered as fixed two-decimal megabytes
        #[must_use]
        pub fn size_mb(&self) -> String {
            format!("{:.2}", self.size_bytes as f64 / (1024.0 * 1024.0))
        }

        /// Modification time rendered as `YYYY-MM-DD HH:MM` in local time
        #[must_use]
        pub fn modified_at(&self) -> String {
            Local
                .timestamp_opt(self.mtime, 0)
                .single()
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| String::from("unknown"))
        }
    }

    // =========================================================================
    // ScannedRepo (ephemeral scan product)
    // =========================================================================

    /// Metadata gathered for one repository during a scan; the upsert input.
    ///
    /// The store assigns (or preserves) the surrogate id.
    #[derive(Debug, Clone)]
    pub struct ScannedRepo {
        /// Directory base name
        pub name: String,
        /// Absolute repository root path
        pub path: PathBuf,
        /// Total bytes of tracked files, `.git` subtree excluded
        pub size_bytes: u64,
        /// Unix timestamp of the root directory's last modification
        pub mtime: i64,
        /// Origin remote URL, if any
        pub remote_url: Option<String>,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
