//! End-to-end extraction over real container files built on the fly.

use doctext::{DocTextError, parse_file};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;
use zip::write::{FileOptions, ZipWriter};

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::<'_, ()>::default();
    for (name, contents) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn write_docx(path: &Path, body: &str) {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>{body}</w:body>
</w:document>"#
    );
    write_zip(path, &[("word/document.xml", &document)]);
}

fn write_pptx(path: &Path, slides: &[&str]) {
    let entries: Vec<(String, String)> = slides
        .iter()
        .enumerate()
        .map(|(i, sp_tree)| {
            let name = format!("ppt/slides/slide{}.xml", i + 1);
            let xml = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
       xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <p:cSld><p:spTree>{sp_tree}</p:spTree></p:cSld>
</p:sld>"#
            );
            (name, xml)
        })
        .collect();
    let borrowed: Vec<(&str, &str)> = entries
        .iter()
        .map(|(name, xml)| (name.as_str(), xml.as_str()))
        .collect();
    write_zip(path, &borrowed);
}

fn write_xlsx(path: &Path, sheet_data: &str) {
    let content_types = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;
    let root_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;
    let workbook = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;
    let workbook_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>{sheet_data}</sheetData>
</worksheet>"#
    );
    write_zip(
        path,
        &[
            ("[Content_Types].xml", content_types),
            ("_rels/.rels", root_rels),
            ("xl/workbook.xml", workbook),
            ("xl/_rels/workbook.xml.rels", workbook_rels),
            ("xl/worksheets/sheet1.xml", &sheet),
        ],
    );
}

fn write_pdf(path: &Path, operations: Vec<Operation>) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn text_ops(placements: &[(&str, f64, f64)]) -> Vec<Operation> {
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
    ];
    let mut prev = (0.0, 0.0);
    for &(text, x, y) in placements {
        ops.push(Operation::new(
            "Td",
            vec![(x - prev.0).into(), (y - prev.1).into()],
        ));
        ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
        prev = (x, y);
    }
    ops.push(Operation::new("ET", vec![]));
    ops
}

#[test]
fn test_docx_paragraphs_then_table_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.docx");
    write_docx(
        &path,
        r#"<w:p><w:r><w:t>Summary</w:t></w:r></w:p>
           <w:tbl>
             <w:tr><w:tc><w:p><w:r><w:t>name</w:t></w:r></w:p></w:tc>
                   <w:tc><w:p><w:r><w:t>count</w:t></w:r></w:p></w:tc></w:tr>
             <w:tr><w:tc><w:p><w:r><w:t>widgets</w:t></w:r></w:p></w:tc>
                   <w:tc><w:p><w:r><w:t>3</w:t></w:r></w:p></w:tc></w:tr>
           </w:tbl>
           <w:p><w:r><w:t>Done</w:t></w:r></w:p>"#,
    );

    let text = parse_file(&path).unwrap();
    assert_eq!(text, "Summary\nDone\nname\tcount\nwidgets\t3");
}

#[test]
fn test_pptx_shapes_and_table_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.pptx");
    write_pptx(
        &path,
        &[r#"<p:sp><p:txBody><a:p><a:r><a:t>Agenda</a:t></a:r></a:p></p:txBody></p:sp>
            <p:graphicFrame><a:graphic>
              <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">
                <a:tbl>
                  <a:tr><a:tc><a:txBody><a:p><a:r><a:t>q</a:t></a:r></a:p></a:txBody></a:tc>
                        <a:tc><a:txBody><a:p><a:r><a:t>a</a:t></a:r></a:p></a:txBody></a:tc></a:tr>
                </a:tbl>
              </a:graphicData></a:graphic></p:graphicFrame>
            <p:sp><p:txBody><a:p><a:r><a:t>Questions</a:t></a:r></a:p></p:txBody></p:sp>"#],
    );

    let text = parse_file(&path).unwrap();
    assert_eq!(text, "Agenda\nq\ta\nQuestions");
}

#[test]
fn test_pptx_slides_in_deck_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deck.pptx");
    write_pptx(
        &path,
        &[
            r#"<p:sp><p:txBody><a:p><a:r><a:t>one</a:t></a:r></a:p></p:txBody></p:sp>"#,
            r#"<p:sp><p:txBody><a:p><a:r><a:t>two</a:t></a:r></a:p></p:txBody></p:sp>"#,
        ],
    );

    let text = parse_file(&path).unwrap();
    assert_eq!(text, "one\ntwo");
}

#[test]
fn test_xlsx_rectangular_scan_with_empty_cell() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.xlsx");
    write_xlsx(
        &path,
        r#"<row r="1">
             <c r="A1" t="inlineStr"><is><t>v11</t></is></c>
             <c r="B1" t="inlineStr"><is><t>v12</t></is></c>
           </row>
           <row r="2">
             <c r="A2" t="inlineStr"><is><t>v21</t></is></c>
           </row>"#,
    );

    let text = parse_file(&path).unwrap();
    assert_eq!(text, "v11\tv12\nv21\t");
}

#[test]
fn test_pdf_body_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    write_pdf(&path, text_ops(&[("Hello from a PDF", 72.0, 720.0)]));

    let text = parse_file(&path).unwrap();
    assert!(text.contains("Hello from a PDF"), "got: {text:?}");
}

#[test]
fn test_pdf_table_rows_after_body() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("table.pdf");
    write_pdf(
        &path,
        text_ops(&[
            ("Quarterly totals", 72.0, 740.0),
            ("region", 72.0, 700.0),
            ("total", 200.0, 700.0),
            ("north", 72.0, 686.0),
            ("1200", 200.0, 686.0),
        ]),
    );

    let text = parse_file(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.contains(&"region\ttotal"), "got: {lines:?}");
    assert!(lines.contains(&"north\t1200"), "got: {lines:?}");
    // Table rows come after the page body fragment.
    let body_pos = lines.iter().position(|l| l.contains("Quarterly")).unwrap();
    let row_pos = lines.iter().position(|l| *l == "region\ttotal").unwrap();
    assert!(body_pos < row_pos);
}

#[test]
fn test_pdf_without_text_yields_empty_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blank.pdf");
    write_pdf(&path, vec![]);

    let text = parse_file(&path).unwrap();
    assert_eq!(text, "");
}

#[test]
fn test_output_is_deterministic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.docx");
    write_docx(
        &path,
        r#"<w:p><w:r><w:t>stable</w:t></w:r></w:p><w:p><w:r><w:t>output</w:t></w:r></w:p>"#,
    );

    let first = parse_file(&path).unwrap();
    let second = parse_file(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_docx_missing_document_part() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hollow.docx");
    write_zip(&path, &[("word/other.xml", "<x/>")]);

    let err = parse_file(&path).unwrap_err();
    assert!(matches!(err, DocTextError::Extraction { .. }));
}

#[test]
fn test_error_messages_are_stable() {
    let err = parse_file("/nonexistent/a.docx").unwrap_err();
    assert_eq!(err.to_string(), "file not found: /nonexistent/a.docx");
}
