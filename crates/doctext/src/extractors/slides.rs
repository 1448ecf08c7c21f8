//! Slide-deck extractor.
//!
//! Slides are visited in deck order and shapes within a slide in their
//! defined order. A text shape emits one fragment with its full (possibly
//! multi-line) text; a table frame emits one fragment per row, tab-joined,
//! interleaved in shape order rather than deferred to the end. Group shapes
//! are walked in place; pictures contribute nothing.

use crate::error::{DocTextError, Result};
use crate::extractors::read_zip_entry;
use crate::parser::join_row;
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

const P_NAMESPACE: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const A_NAMESPACE: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const R_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Closed set of shape kinds; text extraction dispatches on kind instead of
/// probing attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeKind {
    TextBox,
    GraphicFrame,
    Picture,
    Group,
    Other,
}

impl ShapeKind {
    fn classify(node: &Node) -> Self {
        if node.tag_name().namespace() != Some(P_NAMESPACE) {
            return Self::Other;
        }
        match node.tag_name().name() {
            "sp" => Self::TextBox,
            "graphicFrame" => Self::GraphicFrame,
            "pic" => Self::Picture,
            "grpSp" => Self::Group,
            _ => Self::Other,
        }
    }
}

pub fn extract(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let slide_paths = ordered_slide_paths(&mut archive)?;
    tracing::debug!(slides = slide_paths.len(), "discovered slide parts");

    let mut fragments = Vec::new();
    for slide_path in &slide_paths {
        let xml_data = read_zip_entry(&mut archive, slide_path)?;
        parse_slide_xml(&xml_data, &mut fragments)?;
    }

    Ok(fragments)
}

/// Slide parts in presentation order: the `p:sldIdLst` relationship ids from
/// `ppt/presentation.xml` resolved through the presentation rels. Falls back
/// to a numeric sort of `ppt/slides/slideN.xml` names for packages with
/// unusual relationship parts.
fn ordered_slide_paths(archive: &mut ZipArchive<File>) -> Result<Vec<String>> {
    let presentation = read_zip_entry(archive, "ppt/presentation.xml");
    let rels = read_zip_entry(archive, "ppt/_rels/presentation.xml.rels");

    if let (Ok(presentation), Ok(rels)) = (presentation, rels) {
        if let Ok(paths) = slide_paths_from_rels(&presentation, &rels) {
            if !paths.is_empty() {
                return Ok(paths);
            }
        }
    }

    let mut paths: Vec<String> = (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .collect();
    paths.sort_by_key(|name| slide_number(name));
    Ok(paths)
}

fn slide_paths_from_rels(presentation_xml: &[u8], rels_xml: &[u8]) -> Result<Vec<String>> {
    let rels_str = std::str::from_utf8(rels_xml)
        .map_err(|_| DocTextError::extraction("presentation rels are not valid UTF-8"))?;
    let rels_doc = Document::parse(rels_str)?;

    let mut targets: HashMap<String, String> = HashMap::new();
    for rel in rels_doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "Relationship")
    {
        let is_slide = rel.attribute("Type").is_some_and(|t| t.ends_with("/slide"));
        if !is_slide {
            continue;
        }
        if let (Some(id), Some(target)) = (rel.attribute("Id"), rel.attribute("Target")) {
            targets.insert(id.to_string(), resolve_part_path(target));
        }
    }

    let pres_str = std::str::from_utf8(presentation_xml)
        .map_err(|_| DocTextError::extraction("presentation.xml is not valid UTF-8"))?;
    let pres_doc = Document::parse(pres_str)?;

    let mut paths = Vec::new();
    for sld_id in pres_doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "sldId")
    {
        if let Some(rid) = sld_id.attribute((R_NAMESPACE, "id")) {
            if let Some(target) = targets.get(rid) {
                paths.push(target.clone());
            }
        }
    }

    Ok(paths)
}

/// Relationship targets are package-relative (`slides/slide1.xml`); anchor
/// them under `ppt/`.
fn resolve_part_path(target: &str) -> String {
    let target = target.trim_start_matches('/');
    if target.starts_with("ppt/") {
        target.to_string()
    } else {
        format!("ppt/{}", target.trim_start_matches("../"))
    }
}

fn slide_number(name: &str) -> u32 {
    name.chars()
        .filter(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

fn parse_slide_xml(xml_data: &[u8], fragments: &mut Vec<String>) -> Result<()> {
    let xml_str = std::str::from_utf8(xml_data)
        .map_err(|_| DocTextError::extraction("slide XML is not valid UTF-8"))?;
    let doc = Document::parse(xml_str)?;

    let sp_tree = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "spTree" && n.tag_name().namespace() == Some(P_NAMESPACE))
        .ok_or_else(|| DocTextError::extraction("no <p:spTree> in slide"))?;

    for child in sp_tree.children().filter(|n| n.is_element()) {
        walk_shape(&child, fragments);
    }

    Ok(())
}

fn walk_shape(node: &Node, fragments: &mut Vec<String>) {
    match ShapeKind::classify(node) {
        ShapeKind::TextBox => {
            if let Some(text) = shape_text(node) {
                fragments.push(text);
            }
        }
        ShapeKind::GraphicFrame => {
            if let Some(tbl_node) = find_table(node) {
                for tr_node in tbl_node.children().filter(|n| is_a(n, "tr")) {
                    let cells: Vec<String> = tr_node
                        .children()
                        .filter(|n| is_a(n, "tc"))
                        .map(|tc_node| table_cell_text(&tc_node))
                        .collect();
                    fragments.push(join_row(&cells));
                }
            }
        }
        ShapeKind::Group => {
            for child in node.children().filter(|n| n.is_element()) {
                walk_shape(&child, fragments);
            }
        }
        ShapeKind::Picture | ShapeKind::Other => {}
    }
}

fn is_a(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(A_NAMESPACE)
}

/// Full text of a text shape: paragraphs joined by newlines, emitted as a
/// single fragment. A shape without a text body yields no fragment; a shape
/// with an empty text body yields an empty fragment.
fn shape_text(sp_node: &Node) -> Option<String> {
    let tx_body = sp_node
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "txBody" && n.tag_name().namespace() == Some(P_NAMESPACE))?;
    Some(text_body_text(&tx_body))
}

fn text_body_text(tx_body: &Node) -> String {
    let paragraphs: Vec<String> = tx_body
        .children()
        .filter(|n| is_a(n, "p"))
        .map(|p_node| paragraph_text(&p_node))
        .collect();
    paragraphs.join("\n")
}

fn paragraph_text(p_node: &Node) -> String {
    let mut text = String::new();
    for child in p_node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "r" => {
                for t_node in child.children().filter(|n| is_a(n, "t")) {
                    if let Some(s) = t_node.text() {
                        text.push_str(s);
                    }
                }
            }
            "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}

fn find_table<'a, 'input>(frame_node: &Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    let graphic_data = frame_node.descendants().find(|n| {
        n.is_element()
            && n.tag_name().name() == "graphicData"
            && n.tag_name().namespace() == Some(A_NAMESPACE)
            && n.attribute("uri") == Some("http://schemas.openxmlformats.org/drawingml/2006/table")
    })?;
    graphic_data.children().find(|n| is_a(n, "tbl"))
}

/// Table cell text: the cell's `a:txBody` paragraphs joined by newlines.
fn table_cell_text(tc_node: &Node) -> String {
    tc_node
        .children()
        .find(|n| is_a(n, "txBody"))
        .map(|tx_body| text_body_text(&tx_body))
        .unwrap_or_default()
}
