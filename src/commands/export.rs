// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! Export command - writes the catalog (or a filtered view) as CSV
//!
//! Column contract: Name, Path, Size (MB), Last Modified, Remote; size as
//! fixed two-decimal megabytes, timestamps as `YYYY-MM-DD HH:MM`.

use crate::config::Config;
use crate::store::CatalogStore;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Run the export command
pub fn run(config: &Config, output: PathBuf, query: Option<String>) -> Result<()> {
    let store = CatalogStore::open(&config.db_path())
        .with_context(|| format!("failed to open catalog at {}", config.db_path().display()))?;
    let records = match query.as_deref() {
        Some(q) => store.search(q),
        None => store.list_all(),
    }
    .context("failed to read catalog")?;

    info!("Exporting {} records to {}", records.len(), output.display());

    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    writer.write_record(["Name", "Path", "Size (MB)", "Last Modified", "Remote"])?;
    for record in &records {
        let size = record.size_mb();
        let modified = record.modified_at();
        writer.write_record([
            record.name.as_str(),
            record.path.as_str(),
            size.as_str(),
            modified.as_str(),
            record.remote_url.as_deref().unwrap_or(""),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Exported {} records to {}", records.len(), output.display());
    Ok(())
}
