#![allow(dead_code)]

use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object, ObjectId};

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Number of distinct image XObjects in the file.
pub fn image_xobject_count(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|o| o.as_stream().ok())
        .filter(|s| {
            s.dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Image".as_slice())
        })
        .count()
}

fn page_id(doc: &LopdfDocument, page: u32) -> Option<ObjectId> {
    doc.get_pages().get(&page).copied()
}

/// The `cm` matrices of every image drawn on a page, as (width, height, x, y).
pub fn image_placements(doc: &LopdfDocument, page: u32) -> Vec<(f32, f32, f32, f32)> {
    let Some(id) = page_id(doc, page) else {
        return Vec::new();
    };
    let Ok(bytes) = doc.get_page_content(id) else {
        return Vec::new();
    };
    let Ok(content) = Content::decode(&bytes) else {
        return Vec::new();
    };

    let mut placements = Vec::new();
    let mut last_matrix = None;
    for op in &content.operations {
        match op.operator.as_str() {
            "cm" => {
                let values: Vec<f32> = op
                    .operands
                    .iter()
                    .filter_map(|o| o.as_float().ok())
                    .collect();
                if values.len() == 6 {
                    last_matrix = Some((values[0], values[3], values[4], values[5]));
                }
            }
            "Do" => {
                if let Some(matrix) = last_matrix.take() {
                    placements.push(matrix);
                }
            }
            _ => {}
        }
    }
    placements
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}
