//! Directory reconciliation by file stem.
//!
//! Compares two directories on file stems (names without extension) and
//! copies over the documents that exist on the source side only. The stem
//! diff covers every file on both sides; the fixed document extensions only
//! decide which files get copied for a missing stem.

use crate::error::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions tried, in order, when materializing a missing stem.
const SYNC_EXTENSIONS: [&str; 4] = ["txt", "docx", "xlsx", "pdf"];

/// Copy every document whose stem exists in `src_dir` but not in `dst_dir`.
///
/// Stems are collected from all files on both sides, so a destination file
/// under any extension marks its stem as present. For each missing stem,
/// each extension in [`SYNC_EXTENSIONS`] is tried and every match is
/// copied, so a stem present as both `.docx` and `.pdf` brings both files
/// over. Returns the destination paths of the copies, in deterministic
/// (sorted stem, then extension-list) order.
pub fn copy_missing(src_dir: impl AsRef<Path>, dst_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let src_dir = src_dir.as_ref();
    let dst_dir = dst_dir.as_ref();
    fs::create_dir_all(dst_dir)?;

    let src_stems = file_stems(src_dir)?;
    let dst_stems = file_stems(dst_dir)?;
    let missing: Vec<&String> = src_stems.difference(&dst_stems).collect();
    tracing::info!(
        src = %src_dir.display(),
        dst = %dst_dir.display(),
        missing = missing.len(),
        "reconciling directories"
    );

    let mut copied = Vec::new();
    for stem in missing {
        for ext in SYNC_EXTENSIONS {
            let candidate = src_dir.join(format!("{stem}.{ext}"));
            if candidate.is_file() {
                let target = dst_dir.join(format!("{stem}.{ext}"));
                fs::copy(&candidate, &target)?;
                tracing::debug!(file = %target.display(), "copied");
                copied.push(target);
            }
        }
    }

    Ok(copied)
}

/// Stems of all files directly inside `dir`, whatever their extension.
fn file_stems(dir: &Path) -> Result<BTreeSet<String>> {
    let mut stems = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.insert(stem.to_string());
        }
    }
    Ok(stems)
}
