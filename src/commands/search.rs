// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! Search command - substring filter over name or path

use crate::config::Config;
use crate::store::CatalogStore;
use anyhow::{Context, Result};

/// Run the search command. An empty query lists the whole catalog.
pub fn run(config: &Config, query: &str, json: bool) -> Result<()> {
    let store = CatalogStore::open(&config.db_path())
        .with_context(|| format!("failed to open catalog at {}", config.db_path().display()))?;
    let records = store
        .search(query)
        .with_context(|| format!("search failed for {query:?}"))?;
    super::list::print_records(&records, json)
}
