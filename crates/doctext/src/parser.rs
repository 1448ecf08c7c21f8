//! Top-level parse pipeline: resolve, extract, assemble.

use crate::error::{DocTextError, Result};
use crate::extractors;
use crate::format::DocumentFormat;
use std::path::Path;

/// Extract the plain-text content of a document.
///
/// The pipeline is linear: the path is checked for existence, the format is
/// resolved from the file extension, the matching extractor produces an
/// ordered fragment sequence, and the fragments are joined with newlines.
/// Table rows inside a document are rendered as tab-joined cell text.
///
/// Extraction is all-or-nothing: no partial result is returned on failure,
/// and each call holds exactly one open container handle, released when the
/// call returns.
///
/// # Errors
///
/// - [`DocTextError::NotFound`] when the path does not reference an
///   existing file, checked before any parsing is attempted.
/// - [`DocTextError::UnsupportedFormat`] for extensions outside
///   `.doc`/`.docx`/`.pptx`/`.xlsx`/`.pdf`.
/// - [`DocTextError::Extraction`] for any failure inside the format decode.
pub fn parse_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DocTextError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let format = DocumentFormat::from_path(path)?;
    tracing::debug!(path = %path.display(), ?format, "resolved document format");

    let fragments = match format {
        DocumentFormat::Word => extractors::word::extract(path)?,
        DocumentFormat::SlideDeck => extractors::slides::extract(path)?,
        DocumentFormat::Spreadsheet => extractors::sheet::extract(path)?,
        DocumentFormat::Pdf => extractors::pdf::extract(path)?,
    };
    tracing::debug!(count = fragments.len(), "extracted fragments");

    Ok(assemble(&fragments))
}

/// Join fragments into the final text blob.
///
/// Empty fragments are preserved as empty lines to keep the
/// fragment-to-source-unit correspondence.
pub(crate) fn assemble(fragments: &[String]) -> String {
    fragments.join("\n")
}

/// Render one table row as tab-joined cell text.
///
/// An empty cell contributes an empty string, not a skipped column.
pub(crate) fn join_row(cells: &[String]) -> String {
    cells.join("\t")
}
