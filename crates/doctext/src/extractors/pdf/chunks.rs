//! Positioned text chunks from a PDF content stream.
//!
//! The walker tracks the text cursor through the positioning operators and
//! records each shown string together with the cursor position at which it
//! was shown. Positions are in unscaled text-space units, which is all the
//! downstream row/column clustering needs.

use lopdf::{Object, content::Operation};

/// One shown string with the text-space position it was shown at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextChunk {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default)]
struct TextCursor {
    x: f64,
    y: f64,
    line_x: f64,
    line_y: f64,
    leading: f64,
}

impl TextCursor {
    fn set_matrix(&mut self, x: f64, y: f64) {
        self.line_x = x;
        self.line_y = y;
        self.x = x;
        self.y = y;
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.line_x += tx;
        self.line_y += ty;
        self.x = self.line_x;
        self.y = self.line_y;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }
}

pub(crate) fn chunks_from_operations(operations: &[Operation]) -> Vec<TextChunk> {
    let mut cursor = TextCursor::default();
    let mut chunks = Vec::new();

    for op in operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => cursor = TextCursor::default(),
            "Tm" => {
                if let (Some(x), Some(y)) = (number(operands.get(4)), number(operands.get(5))) {
                    cursor.set_matrix(x, y);
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (number(operands.get(0)), number(operands.get(1))) {
                    cursor.move_line(tx, ty);
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (number(operands.get(0)), number(operands.get(1))) {
                    cursor.leading = -ty;
                    cursor.move_line(tx, ty);
                }
            }
            "TL" => {
                if let Some(leading) = number(operands.get(0)) {
                    cursor.leading = leading;
                }
            }
            "T*" => cursor.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    push_chunk(&mut chunks, decode_pdf_string(bytes), &cursor);
                }
            }
            "'" => {
                cursor.next_line();
                if let Some(Object::String(bytes, _)) = operands.first() {
                    push_chunk(&mut chunks, decode_pdf_string(bytes), &cursor);
                }
            }
            "\"" => {
                cursor.next_line();
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    push_chunk(&mut chunks, decode_pdf_string(bytes), &cursor);
                }
            }
            "TJ" => {
                if let Some(Object::Array(elements)) = operands.first() {
                    let mut text = String::new();
                    for element in elements {
                        if let Object::String(bytes, _) = element {
                            text.push_str(&decode_pdf_string(bytes));
                        }
                    }
                    push_chunk(&mut chunks, text, &cursor);
                }
            }
            _ => {}
        }
    }

    chunks
}

fn push_chunk(chunks: &mut Vec<TextChunk>, text: String, cursor: &TextCursor) {
    if text.trim().is_empty() {
        return;
    }
    chunks.push(TextChunk {
        text,
        x: cursor.x,
        y: cursor.y,
    });
}

fn number(object: Option<&Object>) -> Option<f64> {
    match object {
        Some(Object::Integer(i)) => Some(*i as f64),
        Some(Object::Real(r)) => Some(*r as f64),
        _ => None,
    }
}

/// PDF string bytes to text: UTF-16BE when the BOM is present, otherwise the
/// bytes are treated as single-byte character codes. Good enough for the
/// standard encodings table clustering cares about.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}
