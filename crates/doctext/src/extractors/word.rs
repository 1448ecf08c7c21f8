//! Word-family extractor.
//!
//! Reads `word/document.xml` out of the OOXML container and linearizes it:
//! one fragment per body-level paragraph (empty paragraphs included as empty
//! fragments), then one fragment per table row across all tables. Paragraphs
//! are emitted before any table content regardless of physical interleaving;
//! tables are not positioned between the paragraphs that surround them.

use crate::error::{DocTextError, Result};
use crate::extractors::read_zip_entry;
use crate::parser::join_row;
use roxmltree::{Document, Node};
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

const W_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub fn extract(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    let document_xml = read_zip_entry(&mut archive, "word/document.xml")?;
    parse_document_xml(&document_xml)
}

fn parse_document_xml(xml_data: &[u8]) -> Result<Vec<String>> {
    let xml_str = std::str::from_utf8(xml_data)
        .map_err(|_| DocTextError::extraction("document.xml is not valid UTF-8"))?;
    let doc = Document::parse(xml_str)?;

    let body = doc
        .root_element()
        .children()
        .find(|n| is_w(n, "body"))
        .ok_or_else(|| DocTextError::extraction("no <w:body> in document.xml"))?;

    let mut fragments = Vec::new();

    for p_node in body.children().filter(|n| is_w(n, "p")) {
        fragments.push(paragraph_text(&p_node));
    }

    for tbl_node in body.children().filter(|n| is_w(n, "tbl")) {
        for tr_node in tbl_node.children().filter(|n| is_w(n, "tr")) {
            let cells: Vec<String> = tr_node
                .children()
                .filter(|n| is_w(n, "tc"))
                .map(|tc_node| cell_text(&tc_node))
                .collect();
            fragments.push(join_row(&cells));
        }
    }

    Ok(fragments)
}

fn is_w(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(W_NAMESPACE)
}

/// Concatenated run text of one paragraph. Tab and break run children render
/// as `\t` and `\n`; tab-stop definitions under `w:pPr` do not.
fn paragraph_text(p_node: &Node) -> String {
    let mut text = String::new();

    for r_node in p_node.descendants().filter(|n| is_w(n, "r")) {
        for child in r_node.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                "t" => {
                    if let Some(s) = child.text() {
                        text.push_str(s);
                    }
                }
                "tab" => text.push('\t'),
                "br" | "cr" => text.push('\n'),
                _ => {}
            }
        }
    }

    text
}

/// Cell text is the cell's direct paragraphs joined by newlines; a cell with
/// no text contributes an empty string to the row join.
fn cell_text(tc_node: &Node) -> String {
    let paragraphs: Vec<String> = tc_node
        .children()
        .filter(|n| is_w(n, "p"))
        .map(|p_node| paragraph_text(&p_node))
        .collect();
    paragraphs.join("\n")
}
