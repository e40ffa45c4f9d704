// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! List command - renders the whole catalog, most recently modified first

use crate::config::Config;
use crate::store::CatalogStore;
use crate::types::RepoRecord;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// Run the list command
pub fn run(config: &Config, json: bool) -> Result<()> {
    let store = CatalogStore::open(&config.db_path())
        .with_context(|| format!("failed to open catalog at {}", config.db_path().display()))?;
    let records = store.list_all().context("failed to list catalog")?;
    print_records(&records, json)
}

/// Render records either as a human table or as JSON.
pub(crate) fn print_records(records: &[RepoRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    if records.is_empty() {
        println!("Catalog is empty. Run 'repovault scan <path>' first.");
        return Ok(());
    }

    for record in records {
        let name = format!("{:<28}", record.name);
        let size = format!("{:>10}", record.size_mb());
        print!(
            "{}  {} MB  {}  {}",
            name.bold(),
            size,
            record.modified_at(),
            record.path
        );
        match &record.remote_url {
            Some(url) => println!("  [{url}]"),
            None => println!(),
        }
    }
    println!();
    println!("{} repositories", records.len());
    Ok(())
}
