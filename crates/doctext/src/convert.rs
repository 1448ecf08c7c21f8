//! Batch PDF export through headless LibreOffice.
//!
//! Conversion is delegated to `soffice --headless --convert-to pdf`; nothing
//! here interprets document contents. One file's failure is logged and does
//! not abort its siblings.
//!
//! LibreOffice must be installed and `soffice` reachable, either on PATH or
//! through the `DOCTEXT_LIBREOFFICE_PATH`, `SOFFICE_PATH`, or
//! `LIBREOFFICE_PATH` environment variables.

use crate::error::{DocTextError, Result};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Result of one attempted conversion.
#[derive(Debug)]
pub struct ConversionOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub error: Option<DocTextError>,
}

impl ConversionOutcome {
    fn converted(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output: Some(output),
            error: None,
        }
    }

    fn failed(input: PathBuf, error: DocTextError) -> Self {
        Self {
            input,
            output: None,
            error: Some(error),
        }
    }

    pub fn is_converted(&self) -> bool {
        self.output.is_some()
    }
}

/// Export every `.xlsx` directly inside `dir` to a same-named `.pdf` beside
/// it.
pub fn sheets_to_pdf(dir: impl AsRef<Path>) -> Result<Vec<ConversionOutcome>> {
    let dir = dir.as_ref();
    let soffice = locate_soffice()?;
    let inputs = files_with_extensions(dir, &["xlsx"])?;
    tracing::info!(dir = %dir.display(), count = inputs.len(), "exporting spreadsheets to PDF");

    Ok(convert_batch(&soffice, &inputs, dir))
}

/// Convert every `.doc`/`.docx` in `src_dir` to `dst_dir/<stem>.pdf`,
/// creating `dst_dir` when absent.
pub fn docs_to_pdf(src_dir: impl AsRef<Path>, dst_dir: impl AsRef<Path>) -> Result<Vec<ConversionOutcome>> {
    let src_dir = src_dir.as_ref();
    let dst_dir = dst_dir.as_ref();
    let soffice = locate_soffice()?;
    fs::create_dir_all(dst_dir)?;

    let inputs = files_with_extensions(src_dir, &["doc", "docx"])?;
    tracing::info!(
        src = %src_dir.display(),
        dst = %dst_dir.display(),
        count = inputs.len(),
        "converting documents to PDF"
    );

    Ok(convert_batch(&soffice, &inputs, dst_dir))
}

fn convert_batch(soffice: &Path, inputs: &[PathBuf], out_dir: &Path) -> Vec<ConversionOutcome> {
    inputs
        .iter()
        .map(|input| match convert_to_pdf(soffice, input, out_dir) {
            Ok(output) => {
                tracing::debug!(input = %input.display(), output = %output.display(), "converted");
                ConversionOutcome::converted(input.clone(), output)
            }
            Err(error) => {
                tracing::warn!(input = %input.display(), %error, "conversion failed, continuing");
                ConversionOutcome::failed(input.clone(), error)
            }
        })
        .collect()
}

fn convert_to_pdf(soffice: &Path, input: &Path, out_dir: &Path) -> Result<PathBuf> {
    let output = Command::new(soffice)
        .arg("--headless")
        .arg("--norestore")
        .arg("--convert-to")
        .arg("pdf")
        .arg("--outdir")
        .arg(out_dir)
        .arg(input)
        .output()
        .map_err(|e| {
            DocTextError::extraction_with_source(
                format!("failed to run LibreOffice for {}", input.display()),
                e,
            )
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DocTextError::extraction(format!(
            "LibreOffice conversion of {} failed: {}",
            input.display(),
            stderr.trim()
        )));
    }

    let expected = out_dir.join(pdf_name(input)?);
    if !expected.exists() {
        return Err(DocTextError::extraction(format!(
            "LibreOffice reported success but {} was not produced",
            expected.display()
        )));
    }
    Ok(expected)
}

fn pdf_name(input: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| DocTextError::extraction(format!("{} has no file stem", input.display())))?;
    Ok(PathBuf::from(stem).with_extension("pdf"))
}

/// Files directly in `dir` whose extension is in `extensions`, sorted for a
/// deterministic batch order.
fn files_with_extensions(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut matched = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let has_match = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)));
        if has_match {
            matched.push(path);
        }
    }
    matched.sort();
    Ok(matched)
}

fn install_hint() -> String {
    "LibreOffice (soffice) is required for PDF export. \
Install it via your package manager, or point the DOCTEXT_LIBREOFFICE_PATH \
environment variable at the soffice executable."
        .to_string()
}

fn soffice_candidates() -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut push_candidate = |path: PathBuf| {
        if seen.insert(path.clone()) {
            candidates.push(path);
        }
    };

    for var in ["DOCTEXT_LIBREOFFICE_PATH", "SOFFICE_PATH", "LIBREOFFICE_PATH"] {
        if let Some(value) = env::var_os(var).filter(|v| !v.is_empty()) {
            push_candidate(PathBuf::from(value));
        }
    }

    if cfg!(target_os = "macos") {
        push_candidate(PathBuf::from("/Applications/LibreOffice.app/Contents/MacOS/soffice"));
    }
    if cfg!(target_os = "windows") {
        push_candidate(PathBuf::from("C:\\Program Files\\LibreOffice\\program\\soffice.exe"));
    }

    if let Some(path_env) = env::var_os("PATH") {
        for dir in env::split_paths(&path_env) {
            push_candidate(dir.join("soffice"));
            push_candidate(dir.join("libreoffice"));
            push_candidate(dir.join("soffice.exe"));
        }
    }

    candidates
}

fn locate_soffice() -> Result<PathBuf> {
    for candidate in soffice_candidates() {
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(DocTextError::MissingDependency(install_hint()))
}
