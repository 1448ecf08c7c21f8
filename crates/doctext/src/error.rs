//! Error types for doctext.
//!
//! The public taxonomy is deliberately small: `NotFound` and
//! `UnsupportedFormat` are produced by the format resolver before any
//! extractor runs, and every decoder-level failure (corrupt container,
//! malformed XML, unreadable PDF stream) surfaces as `Extraction` with the
//! original cause preserved via `#[source]`. The `From` impls for the
//! decoder error types perform that normalization, so callers of
//! [`parse_file`](crate::parse_file) never observe a raw library error.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `DocTextError`.
pub type Result<T> = std::result::Result<T, DocTextError>;

/// Main error type for all doctext operations.
#[derive(Debug, Error)]
pub enum DocTextError {
    /// The input path does not reference an existing file.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file extension is not in the recognized set.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The underlying format decode failed.
    #[error("extraction failed: {message}")]
    Extraction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An external tool required by a conversion utility is missing.
    /// Never produced by `parse_file`.
    #[error("missing dependency: {0}")]
    MissingDependency(String),
}

impl DocTextError {
    /// Create an `Extraction` error without a source.
    pub fn extraction<S: Into<String>>(message: S) -> Self {
        Self::Extraction {
            message: message.into(),
            source: None,
        }
    }

    /// Create an `Extraction` error preserving the original cause.
    pub fn extraction_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Extraction {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<std::io::Error> for DocTextError {
    fn from(err: std::io::Error) -> Self {
        Self::Extraction {
            message: format!("I/O failure during decode: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<zip::result::ZipError> for DocTextError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Extraction {
            message: format!("invalid container: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<roxmltree::Error> for DocTextError {
    fn from(err: roxmltree::Error) -> Self {
        Self::Extraction {
            message: format!("malformed XML: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<calamine::Error> for DocTextError {
    fn from(err: calamine::Error) -> Self {
        Self::Extraction {
            message: format!("spreadsheet decode failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<lopdf::Error> for DocTextError {
    fn from(err: lopdf::Error) -> Self {
        Self::Extraction {
            message: format!("PDF decode failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}
