// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! Preview command - reports the best-fit preview image for a repository

use crate::preview::{select_preview, PreviewSelection};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Run the preview command
pub fn run(path: PathBuf) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("invalid repository path {}", path.display()))?;

    match select_preview(&root) {
        PreviewSelection::Selected(image) => {
            println!("{}", image.path.display());
            println!(
                "{}x{} (score {:.1})",
                image.width, image.height, image.score
            );
        }
        PreviewSelection::NoCandidates => {
            println!("No suitable image found in assets.");
        }
        PreviewSelection::Unsupported => {
            println!("Image preview is unavailable: built without the 'preview' feature.");
        }
    }
    Ok(())
}
