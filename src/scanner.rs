// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! Repository discovery and metadata extraction

use crate::remote::RemoteUrlResolver;
use crate::types::ScannedRepo;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Returns true when `path` directly contains a `.git` directory.
#[must_use]
pub fn is_repo_root(path: &Path) -> bool {
    path.join(".git").is_dir()
}

fn is_git_metadata_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == OsStr::new(".git")
}

/// Walk `root` and collect every directory (the root included) that directly
/// contains a `.git` directory.
///
/// Descent is deliberately not pruned at matched repositories, so repos
/// nested inside other repos are discovered as their own entries. Unreadable
/// directories are skipped and traversal continues. The result is
/// deduplicated, ordered by first encounter.
#[must_use]
pub fn discover_repos(root: &Path) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut found = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        if is_repo_root(path) && seen.insert(path.to_path_buf()) {
            found.push(path.to_path_buf());
        }
    }

    found
}

/// Sum of the sizes of all regular files under `root`.
///
/// With `exclude_git` the `.git` subtree is pruned from the walk itself, so
/// its internal structure is never traversed. A file whose size cannot be
/// read contributes zero.
#[must_use]
pub fn tree_size_bytes(root: &Path, exclude_git: bool) -> u64 {
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(move |entry| !(exclude_git && is_git_metadata_dir(entry)));

    let mut total: u64 = 0;
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        total += entry.metadata().map(|m| m.len()).unwrap_or(0);
    }
    total
}

/// Gather the catalog metadata for one repository root: on-disk footprint
/// (`.git` excluded), the root directory's own mtime, and the origin remote.
pub fn collect_metadata(repo: &Path, resolver: &RemoteUrlResolver) -> Result<ScannedRepo> {
    let name = repo
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| repo.display().to_string());

    let metadata = std::fs::metadata(repo)
        .with_context(|| format!("failed to stat {}", repo.display()))?;
    let mtime = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    Ok(ScannedRepo {
        name,
        path: repo.to_path_buf(),
        size_bytes: tree_size_bytes(repo, true),
        mtime,
        remote_url: resolver.resolve(repo),
    })
}
