//! Spreadsheet extractor.
//!
//! Every worksheet is scanned as a full rectangle from row 1, column 1 to
//! the end of its used range. One fragment per scanned row, cells tab-joined,
//! empty cells rendered as empty strings so column positions survive. Sheets
//! follow each other with no separator fragment.

use crate::error::Result;
use crate::parser::join_row;
use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;

pub fn extract(path: &Path) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();
    tracing::debug!(sheets = sheet_names.len(), "scanning workbook");

    let mut fragments = Vec::new();
    for name in &sheet_names {
        let range = workbook.worksheet_range(name)?;
        scan_range(&range, &mut fragments);
    }

    Ok(fragments)
}

/// Rectangular scan in absolute coordinates. The scan always starts at
/// (0, 0) even when the used range does not, so leading blank rows and
/// columns inside the bounds show up as empty cells.
fn scan_range(range: &Range<Data>, fragments: &mut Vec<String>) {
    let Some((end_row, end_col)) = range.end() else {
        return;
    };

    for row in 0..=end_row {
        let mut cells = Vec::with_capacity(end_col as usize + 1);
        for col in 0..=end_col {
            let mut cell = String::new();
            if let Some(value) = range.get_value((row, col)) {
                write_cell_value(value, &mut cell);
            }
            cells.push(cell);
        }
        fragments.push(join_row(&cells));
    }
}

/// Render one cell value as display text. Numbers with no fractional part
/// drop the decimal point; zero and false render literally rather than as
/// blanks.
fn write_cell_value(value: &Data, out: &mut String) {
    match value {
        Data::Empty => {}
        Data::String(s) => out.push_str(s),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                out.push_str(&(*f as i64).to_string());
            } else {
                out.push_str(&f.to_string());
            }
        }
        Data::Int(i) => out.push_str(&i.to_string()),
        Data::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Data::DateTime(dt) => {
            if let Some(formatted) = dt.as_datetime() {
                out.push_str(&formatted.to_string());
            } else {
                out.push_str(&dt.as_f64().to_string());
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => out.push_str(s),
        Data::Error(e) => out.push_str(&format!("{e:?}")),
    }
}
