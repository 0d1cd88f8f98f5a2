#![allow(dead_code)]

use estimate_pdf::FormDataBag;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use serde_json::Value;
use std::io::Cursor;

/// Wraps a page bag into form data under `page_key`.
pub fn form(page_key: &str, page: Value) -> FormDataBag {
    let mut root = serde_json::Map::new();
    root.insert(page_key.to_string(), page);
    estimate_types::bag_from_value(Value::Object(root)).expect("form data is an object")
}

/// A page with `count` scalar fields named `Field 1`..`Field N`.
pub fn scalar_fields(count: usize) -> Value {
    let fields: serde_json::Map<String, Value> = (1..=count)
        .map(|i| (format!("Field {}", i), Value::String(format!("value {}", i))))
        .collect();
    Value::Object(fields)
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 120, 200])));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .expect("jpeg encoded");
    bytes
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let pixel = Rgba([10, 160, 60, 128]);
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, pixel));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("png encoded");
    bytes
}

/// A standalone PDF whose pages read `<label> 1`, `<label> 2`, ...
///
/// The font lives on the page tree root, so pages rely on inherited resources.
pub fn attachment_pdf(label: &str, pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = (1..=pages)
        .map(|n| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 14.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(format!("{} {}", label, n))]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().expect("content")));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            page_id.into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("attachment saved");
    bytes
}

/// Like [`attachment_pdf`], but the inherited `/Resources` points at an
/// object the file does not contain.
pub fn attachment_pdf_with_dangling_resources(label: &str, pages: usize) -> Vec<u8> {
    let mut doc = Document::load_mem(&attachment_pdf(label, pages)).expect("attachment loads");
    let root_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .expect("catalog");
    let pages_id = doc
        .get_dictionary(root_id)
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .expect("page tree");
    doc.get_dictionary_mut(pages_id)
        .expect("page tree dictionary")
        .set("Resources", Object::Reference((999, 0)));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("attachment saved");
    bytes
}
