// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! Scan command - discovers git repositories and upserts them into the catalog

use crate::config::Config;
use crate::remote::RemoteUrlResolver;
use crate::scanner::{collect_metadata, discover_repos};
use crate::store::CatalogStore;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Run the scan command
pub fn run(config: &Config, path: PathBuf) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("invalid scan root {}", path.display()))?;
    info!("Scanning {}", root.display());

    let store = CatalogStore::open(&config.db_path())
        .with_context(|| format!("failed to open catalog at {}", config.db_path().display()))?;
    let resolver = RemoteUrlResolver::default();

    let repos = discover_repos(&root);
    if repos.is_empty() {
        println!("No git repositories found in {}", root.display());
        return Ok(());
    }

    let mut cataloged = 0usize;
    for repo in &repos {
        match collect_metadata(repo, &resolver) {
            Ok(scanned) => match store.upsert(&scanned) {
                Ok(_) => {
                    let remote = scanned.remote_url.as_deref().unwrap_or("no remote");
                    println!("  {} [{}]", scanned.name.bold(), remote);
                    cataloged += 1;
                }
                Err(err) => warn!("failed to catalog {}: {err}", repo.display()),
            },
            Err(err) => warn!("skipping {}: {err}", repo.display()),
        }
    }

    println!();
    println!(
        "Cataloged {} of {} repositories",
        cataloged.green(),
        repos.len()
    );
    Ok(())
}
