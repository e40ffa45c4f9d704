// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! Archive command - zips a repository tree, `.git` excluded by default

use crate::archive::archive_repo;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Run the archive command
pub fn run(path: PathBuf, output: PathBuf, include_git: bool) -> Result<()> {
    let src = path
        .canonicalize()
        .with_context(|| format!("invalid repository path {}", path.display()))?;
    if !src.is_dir() {
        bail!("{} is not a directory", src.display());
    }

    info!("Archiving {} to {}", src.display(), output.display());
    let count = archive_repo(&src, &output, include_git)?;
    println!("Archive created: {} ({count} files)", output.display());
    Ok(())
}
