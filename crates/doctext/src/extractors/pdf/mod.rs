//! PDF extractor.
//!
//! Pages are visited in document order. Each page contributes its body text
//! as one fragment (pages with no text are skipped, not an error), followed
//! by one fragment per detected table row. Table cells keep their column
//! position; newlines inside a cell collapse to spaces.

mod chunks;
mod table;

use crate::error::Result;
use crate::parser::join_row;
use lopdf::{Document, content::Content};
use std::path::Path;

pub fn extract(path: &Path) -> Result<Vec<String>> {
    let doc = Document::load(path)?;
    let pages = doc.get_pages();
    tracing::debug!(pages = pages.len(), "walking PDF pages");

    let mut fragments = Vec::new();
    for (&page_num, &page_id) in &pages {
        let body = doc.extract_text(&[page_num])?;
        let body = body.trim();
        if !body.is_empty() {
            fragments.push(body.to_string());
        }

        let content_data = doc.get_page_content(page_id)?;
        let content = Content::decode(&content_data)?;
        let page_chunks = chunks::chunks_from_operations(&content.operations);

        for table in table::detect_tables(page_chunks) {
            for row in table {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| cell.replace('\n', " "))
                    .collect();
                fragments.push(join_row(&cells));
            }
        }
    }

    Ok(fragments)
}
