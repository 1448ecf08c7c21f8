//! Format-specific extractor strategies.
//!
//! Each extractor consumes a file path and produces an ordered sequence of
//! text fragments; fragments are never reordered after production. The
//! strategies share no state and are leaves with respect to each other.

use crate::error::{DocTextError, Result};
use std::io::{Read, Seek};
use zip::ZipArchive;
use zip::result::ZipError;

pub mod pdf;
pub mod sheet;
pub mod slides;
pub mod word;

/// Read one named part out of an OOXML container.
pub(crate) fn read_zip_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut entry = archive.by_name(name).map_err(|e| match e {
        ZipError::FileNotFound => DocTextError::extraction(format!("missing archive part: {name}")),
        other => other.into(),
    })?;

    let mut contents = Vec::new();
    entry.read_to_end(&mut contents)?;
    Ok(contents)
}
