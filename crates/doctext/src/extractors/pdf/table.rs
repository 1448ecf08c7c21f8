//! Table reconstruction from positioned text chunks.
//!
//! Chunks are grouped into visual lines by baseline, then consecutive lines
//! that each carry at least two chunks are treated as a table region. Column
//! positions are clustered across the whole region so rows with missing
//! cells still line up.

use super::chunks::TextChunk;
use std::cmp::Ordering;

/// Baselines closer than this are the same visual line.
const ROW_TOLERANCE: f64 = 2.0;
/// Chunk x positions closer than this belong to the same column.
const COLUMN_TOLERANCE: f64 = 4.0;
/// A table needs at least this many multi-chunk lines in a row.
const MIN_TABLE_ROWS: usize = 2;

#[derive(Debug)]
struct Line {
    y: f64,
    chunks: Vec<TextChunk>,
}

/// Detect the table regions on one page. Each table is a row-major grid of
/// cell strings; cells with no chunk are empty.
pub(crate) fn detect_tables(chunks: Vec<TextChunk>) -> Vec<Vec<Vec<String>>> {
    let lines = group_lines(chunks);

    let mut tables = Vec::new();
    let mut run: Vec<&Line> = Vec::new();
    for line in &lines {
        if line.chunks.len() >= 2 {
            run.push(line);
        } else {
            flush_run(&mut run, &mut tables);
        }
    }
    flush_run(&mut run, &mut tables);

    tables
}

fn flush_run(run: &mut Vec<&Line>, tables: &mut Vec<Vec<Vec<String>>>) {
    if run.len() >= MIN_TABLE_ROWS {
        tables.push(build_table(run));
    }
    run.clear();
}

/// Group chunks into lines, top of the page first, left to right within a
/// line.
fn group_lines(mut chunks: Vec<TextChunk>) -> Vec<Line> {
    chunks.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });

    let mut lines: Vec<Line> = Vec::new();
    for chunk in chunks {
        match lines.last_mut() {
            Some(line) if (line.y - chunk.y).abs() <= ROW_TOLERANCE => line.chunks.push(chunk),
            _ => lines.push(Line {
                y: chunk.y,
                chunks: vec![chunk],
            }),
        }
    }

    for line in &mut lines {
        line.chunks
            .sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
    }

    lines
}

fn build_table(lines: &[&Line]) -> Vec<Vec<String>> {
    let columns = cluster_columns(lines);

    lines
        .iter()
        .map(|line| {
            let mut cells = vec![String::new(); columns.len()];
            for chunk in &line.chunks {
                let idx = nearest_column(&columns, chunk.x);
                if !cells[idx].is_empty() {
                    cells[idx].push(' ');
                }
                cells[idx].push_str(&chunk.text);
            }
            cells
        })
        .collect()
}

/// Distinct column anchor positions across the region, left to right.
fn cluster_columns(lines: &[&Line]) -> Vec<f64> {
    let mut xs: Vec<f64> = lines
        .iter()
        .flat_map(|line| line.chunks.iter().map(|chunk| chunk.x))
        .collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mut columns: Vec<f64> = Vec::new();
    for x in xs {
        match columns.last() {
            Some(&anchor) if (x - anchor).abs() <= COLUMN_TOLERANCE => {}
            _ => columns.push(x),
        }
    }
    columns
}

fn nearest_column(columns: &[f64], x: f64) -> usize {
    columns
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (x - **a)
                .abs()
                .partial_cmp(&(x - **b).abs())
                .unwrap_or(Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}
