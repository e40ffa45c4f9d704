// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! Selective zip archiving of a repository tree

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Write every file under `src` into a deflate-compressed zip at `dest`,
/// entry names relative to `src`. The `.git` subtree is excluded unless
/// `include_git` is set. Per-file failures are skipped; the archive
/// completes with the remaining files. Returns the number of entries
/// written.
pub fn archive_repo(src: &Path, dest: &Path, include_git: bool) -> Result<usize> {
    let file = File::create(dest)
        .with_context(|| format!("failed to create archive at {}", dest.display()))?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    let walker = WalkDir::new(src).into_iter().filter_entry(|entry| {
        include_git || !(entry.file_type().is_dir() && entry.file_name() == OsStr::new(".git"))
    });

    let mut count = 0usize;
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let entry_name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let mut source = match File::open(entry.path()) {
            Ok(source) => source,
            Err(err) => {
                warn!("skipping {}: {err}", entry.path().display());
                continue;
            }
        };
        if let Err(err) = writer.start_file(entry_name, options) {
            warn!("skipping {}: {err}", entry.path().display());
            continue;
        }
        if let Err(err) = std::io::copy(&mut source, &mut writer) {
            warn!("skipping {}: {err}", entry.path().display());
            continue;
        }
        count += 1;
    }

    writer
        .finish()
        .with_context(|| format!("failed to finalize archive at {}", dest.display()))?;
    Ok(count)
}
