//! Document format resolution.
//!
//! The extension-to-format mapping is a fixed, closed set; dispatch happens
//! once per call through [`DocumentFormat::from_path`] and never changes at
//! runtime.

use crate::error::{DocTextError, Result};
use std::path::Path;

/// The container formats the parser understands.
///
/// `.doc` and `.docx` both resolve to [`DocumentFormat::Word`]; legacy OLE
/// compound files fail later in the container decode and surface as
/// [`DocTextError::Extraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Word,
    SlideDeck,
    Spreadsheet,
    Pdf,
}

impl DocumentFormat {
    /// Look up a format by file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "doc" | "docx" => Some(Self::Word),
            "pptx" => Some(Self::SlideDeck),
            "xlsx" => Some(Self::Spreadsheet),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Resolve a format from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`DocTextError::UnsupportedFormat`] when the path has no
    /// extension or an extension outside the recognized set; the raw
    /// extension text is carried for diagnostics.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                DocTextError::UnsupportedFormat(format!("{} (no extension)", path.display()))
            })?;

        Self::from_extension(ext)
            .ok_or_else(|| DocTextError::UnsupportedFormat(format!(".{}", ext.to_ascii_lowercase())))
    }
}
