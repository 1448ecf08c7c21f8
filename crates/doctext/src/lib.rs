//! Plain-text extraction from office documents and PDFs.
//!
//! One entry point, [`parse_file`], turns a `.doc`/`.docx`, `.pptx`,
//! `.xlsx`, or `.pdf` file into a single newline-joined text blob suitable
//! for indexing or embedding pipelines. Table rows anywhere in a document
//! come out as tab-joined cell text.
//!
//! ```no_run
//! let text = doctext::parse_file("report.docx")?;
//! println!("{text}");
//! # Ok::<(), doctext::DocTextError>(())
//! ```
//!
//! Extraction is all-or-nothing per file and the output for a given file is
//! byte-for-byte deterministic. Failures surface as [`DocTextError`]: a
//! missing file, an unrecognized extension, or a decode failure inside the
//! selected format.
//!
//! The [`convert`] and [`dirsync`] modules carry the batch companions:
//! headless LibreOffice PDF export and stem-based directory reconciliation.

#![deny(unsafe_code)]

pub mod convert;
pub mod dirsync;
mod error;
mod extractors;
mod format;
mod parser;

pub use error::{DocTextError, Result};
pub use format::DocumentFormat;
pub use parser::parse_file;
