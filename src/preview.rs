// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! Preview image selection
//!
//! Scores candidate images found in conventional asset folders against a
//! fixed target resolution and aspect ratio; the lowest score wins. Pixel
//! probing is an optional capability gated behind the `preview` feature, so
//! callers can distinguish "no images" from "cannot evaluate images".

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Asset folders probed directly beneath a repository root.
pub const ASSET_DIR_CANDIDATES: &[&str] = &["assets", "Assets", "media", "Media"];

/// Recognized image file extensions (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Target preview width in pixels.
pub const TARGET_WIDTH: u32 = 1280;
/// Target preview height in pixels.
pub const TARGET_HEIGHT: u32 = 640;

const TARGET_ASPECT: f64 = TARGET_WIDTH as f64 / TARGET_HEIGHT as f64;
const EXACT_MATCH_BONUS: f64 = -5000.0;
const UNUSABLE_SCORE: f64 = 1e9;

/// A scored candidate; exists only while a selection runs.
#[derive(Debug, Clone)]
pub struct CandidateImage {
    /// Absolute image path
    pub path: PathBuf,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Fitness score, lower is better
    pub score: f64,
}

/// Outcome of a preview selection.
#[derive(Debug)]
pub enum PreviewSelection {
    /// The best-fit candidate
    Selected(CandidateImage),
    /// Asset folders held no image whose dimensions could be read
    NoCandidates,
    /// The crate was built without image-dimension support
    Unsupported,
}

/// Whether this build can read image dimensions at all.
#[must_use]
pub fn dimension_support() -> bool {
    cfg!(feature = "preview")
}

/// Enumerate image files under the conventional asset folders of
/// `repo_root`, in traversal order.
#[must_use]
pub fn candidate_images(repo_root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for dir in ASSET_DIR_CANDIDATES {
        let base = repo_root.join(dir);
        if !base.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&base).into_iter().flatten() {
            if !entry.file_type().is_file() {
                continue;
            }
            let extension = entry
                .path()
                .extension()
                .map(|e| e.to_string_lossy().to_ascii_lowercase());
            if let Some(ext) = extension {
                if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                    out.push(entry.path().to_path_buf());
                }
            }
        }
    }
    out
}

/// Deviation of `(width, height)` from the target aspect ratio and
/// resolution; an exact resolution match earns a large negative bonus.
#[must_use]
pub fn fitness_score(width: u32, height: u32) -> f64 {
    if width == 0 || height == 0 {
        return UNUSABLE_SCORE;
    }
    let aspect = f64::from(width) / f64::from(height);
    let aspect_penalty = (aspect - TARGET_ASPECT).abs() * 1000.0;
    let size_penalty =
        f64::from(width.abs_diff(TARGET_WIDTH)) + f64::from(height.abs_diff(TARGET_HEIGHT));
    let exact_bonus = if width == TARGET_WIDTH && height == TARGET_HEIGHT {
        EXACT_MATCH_BONUS
    } else {
        0.0
    };
    aspect_penalty + size_penalty + exact_bonus
}

/// Minimum-score selection over probed candidates. Strict less-than during
/// the scan, so the first of equally scored candidates wins.
#[must_use]
pub fn pick_best<I>(probed: I) -> Option<CandidateImage>
where
    I: IntoIterator<Item = (PathBuf, u32, u32)>,
{
    let mut best: Option<CandidateImage> = None;
    for (path, width, height) in probed {
        let score = fitness_score(width, height);
        if best.as_ref().map_or(true, |b| score < b.score) {
            best = Some(CandidateImage {
                path,
                width,
                height,
                score,
            });
        }
    }
    best
}

/// Select the best-fit preview image for `repo_root`.
///
/// Candidates whose dimensions cannot be read are skipped. Without the
/// `preview` feature the result is [`PreviewSelection::Unsupported`].
#[must_use]
pub fn select_preview(repo_root: &Path) -> PreviewSelection {
    if !dimension_support() {
        return PreviewSelection::Unsupported;
    }
    let probed = candidate_images(repo_root)
        .into_iter()
        .filter_map(|path| probe_dimensions(&path).map(|(w, h)| (path, w, h)));
    match pick_best(probed) {
        Some(best) => PreviewSelection::Selected(best),
        None => PreviewSelection::NoCandidates,
    }
}

#[cfg(feature = "preview")]
fn probe_dimensions(path: &Path) -> Option<(u32, u32)> {
    image::image_dimensions(path).ok()
}

#[cfg(not(feature = "preview"))]
fn probe_dimensions(_path: &Path) -> Option<(u32, u32)> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_bonus_dominates() {
        let exact = fitness_score(TARGET_WIDTH, TARGET_HEIGHT);
        let double = fitness_score(1920, 960);
        assert!(exact < double);
        assert!(exact < 0.0);
    }

    #[test]
    fn zero_dimensions_are_unusable() {
        assert!(fitness_score(0, 640) >= UNUSABLE_SCORE);
        assert!(fitness_score(1280, 0) >= UNUSABLE_SCORE);
    }

    #[test]
    fn tie_break_keeps_first_candidate() {
        let first = PathBuf::from("a.png");
        let second = PathBuf::from("b.png");
        let best = pick_best(vec![(first.clone(), 800, 400), (second, 800, 400)]).unwrap();
        assert_eq!(best.path, first);
    }

    #[test]
    fn lower_score_replaces_earlier_candidate() {
        let best = pick_best(vec![
            (PathBuf::from("far.png"), 100, 100),
            (PathBuf::from("exact.png"), TARGET_WIDTH, TARGET_HEIGHT),
        ])
        .unwrap();
        assert_eq!(best.path, PathBuf::from("exact.png"));
        assert_eq!(best.width, TARGET_WIDTH);
    }
}
