mod common;

use common::fixtures::*;
use common::{GeneratedPdf, Harness, TestResult};
use estimate_pdf::{AssemblyError, Block, PageSlot};
use estimate_types::PageGeometry;
use serde_json::json;

#[test]
fn test_missing_page_fails_without_output() -> TestResult {
    let harness = Harness::new();
    let data = form("Inspection", json!({"Roof": "Good"}));

    let result = harness.assemble("Quote Details", &data);
    assert!(matches!(result, Err(AssemblyError::NoDataForPage(ref key)) if key == "Quote Details"));
    assert!(harness.output_files().is_empty());
    assert!(harness.sink.exported().is_empty());
    Ok(())
}

#[test]
fn test_null_page_counts_as_missing() -> TestResult {
    let harness = Harness::new();
    let data = form("Custom Page 1", json!(null));
    let result = harness.assemble("Custom Page 1", &data);
    assert!(matches!(result, Err(AssemblyError::NoDataForPage(_))));
    assert!(harness.output_files().is_empty());
    Ok(())
}

#[test]
fn test_sixty_fields_split_thirty_eight_and_twenty_two() -> TestResult {
    let harness = Harness::new();
    let data = form("Inspection", scalar_fields(60));

    let document = harness.assemble("Inspection", &data)?;
    assert_eq!(document.page_count, 2);

    let pdf = GeneratedPdf::from_bytes(document.bytes)?;
    assert_pdf_page_count!(pdf, 2);
    let first = pdf.page_text(1);
    let second = pdf.page_text(2);
    assert!(first.contains("Field 1: value 1"));
    assert!(first.contains("Field 38: value 38"));
    assert!(!first.contains("Field 39: value 39"));
    assert!(second.contains("Field 39: value 39"));
    assert!(second.contains("Field 60: value 60"));
    Ok(())
}

#[test]
fn test_line_counts_per_page() -> TestResult {
    let harness = Harness::new();
    let data = form("Inspection", scalar_fields(60));

    let outcome = harness.layout("Inspection", &data)?;
    let counts: Vec<usize> = outcome
        .document
        .composed_pages()
        .map(|page| page.text_lines().count())
        .collect();
    assert_eq!(counts, vec![38, 22]);
    Ok(())
}

#[test]
fn test_null_field_prints_not_available() -> TestResult {
    let harness = Harness::new();
    let data = form("Title Page", json!({"Customer": "Jane", "Phone": null}));

    let pdf = GeneratedPdf::from_bytes(harness.assemble("Title Page", &data)?.bytes)?;
    assert_pdf_contains_text!(pdf, "Customer: Jane");
    assert_pdf_contains_text!(pdf, "Phone: N/A");
    Ok(())
}

#[test]
fn test_scalars_use_json_formatting() -> TestResult {
    let harness = Harness::new();
    let data = form(
        "Quote Details",
        json!({"Total": 1234.5, "Units": 3, "Insured": false, "Note": ""}),
    );

    let outcome = harness.layout("Quote Details", &data)?;
    assert_eq!(
        outcome.document.text_lines(),
        vec!["Total: 1234.5", "Units: 3", "Insured: false", "Note: "]
    );
    Ok(())
}

#[test]
fn test_array_markers_and_item_labels() -> TestResult {
    let harness = Harness::new();
    let data = form("Layout", json!({"Items": [1, 2, 3]}));

    let outcome = harness.layout("Layout", &data)?;
    assert_eq!(
        outcome.document.text_lines(),
        vec!["Items: [Array]", "Item: 1", "Item: 2", "Item: 3"]
    );

    let pdf = GeneratedPdf::from_bytes(harness.assemble("Layout", &data)?.bytes)?;
    assert_pdf_contains_text!(pdf, "Items: [Array]");
    assert_pdf_contains_text!(pdf, "Item: 3");
    Ok(())
}

#[test]
fn test_nested_objects_are_flattened_in_order() -> TestResult {
    let harness = Harness::new();
    let data = form(
        "Inspection",
        json!({
            "Address": {"Street": "Main St 1", "City": "Oslo"},
            "Gutters": [{"Side": "North"}, {"Side": "South"}],
            "Done": true
        }),
    );

    let outcome = harness.layout("Inspection", &data)?;
    assert_eq!(
        outcome.document.text_lines(),
        vec![
            "Address: [Object]",
            "Street: Main St 1",
            "City: Oslo",
            "Gutters: [Array]",
            "Item: [Object]",
            "Side: North",
            "Item: [Object]",
            "Side: South",
            "Done: true",
        ]
    );
    Ok(())
}

#[test]
fn test_non_object_page_is_one_line() -> TestResult {
    let harness = Harness::new();
    let data = form("Introduction", json!("Thanks for choosing us."));

    let outcome = harness.layout("Introduction", &data)?;
    assert_eq!(
        outcome.document.text_lines(),
        vec!["Introduction: Thanks for choosing us."]
    );
    Ok(())
}

#[test]
fn test_empty_page_still_produces_a_document() -> TestResult {
    let harness = Harness::new();
    let data = form("Terms and Conditions", json!({}));

    let document = harness.assemble("Terms and Conditions", &data)?;
    assert_eq!(document.page_count, 1);
    let pdf = GeneratedPdf::from_bytes(document.bytes)?;
    assert_pdf_page_count!(pdf, 1);
    Ok(())
}

#[test]
fn test_deep_nesting_is_truncated() -> TestResult {
    let harness = Harness::configured(Default::default(), |builder| builder.with_max_depth(2));
    let data = form(
        "Inspection",
        json!({"a": {"b": {"c": {"d": "hidden"}}}, "after": "shown"}),
    );

    let outcome = harness.layout("Inspection", &data)?;
    assert_eq!(
        outcome.document.text_lines(),
        vec!["a: [Object]", "b: [Object]", "c: [Truncated]", "after: shown"]
    );
    Ok(())
}

#[test]
fn test_long_value_wraps_to_the_drawable_width() -> TestResult {
    let harness = Harness::new();
    let scope = "Remove existing shingles and underlayment, inspect decking, ".repeat(6);
    let data = form("Scope of Work", json!({"Scope": scope.trim_end(), "Total": 100}));

    let outcome = harness.layout("Scope of Work", &data)?;
    let lines = outcome.document.text_lines();
    assert!(lines.len() > 3, "{:?}", lines);
    assert!(lines[0].starts_with("Scope: Remove existing"));
    assert_eq!(lines.last().copied(), Some("Total: 100"));
    assert_eq!(
        lines[..lines.len() - 1].join(" "),
        format!("Scope: {}", scope.trim_end())
    );

    let page = outcome.document.composed_pages().next().expect("one page");
    let mut previous_y = f32::MAX;
    for block in &page.blocks {
        let Block::Text(text) = block else {
            panic!("unexpected block {:?}", block);
        };
        assert!(text.x + text.width <= 595.28 - 40.0 + 0.01, "{:?}", text);
        assert!(text.y < previous_y);
        previous_y = text.y;
    }

    let pdf = GeneratedPdf::from_bytes(harness.assemble("Scope of Work", &data)?.bytes)?;
    assert_pdf_contains_text!(pdf, "Scope: Remove existing");
    assert_pdf_contains_text!(pdf, "Total: 100");
    Ok(())
}

#[test]
fn test_every_block_is_inside_the_margins() -> TestResult {
    let harness = Harness::new();
    let mut page = serde_json::Map::new();
    for i in 0..25 {
        page.insert(format!("Note {}", i), json!("gutter clean ".repeat(i)));
        page.insert(format!("Photo {}", i), json!(format!("file:///p{}.jpg", i)));
        harness.add_resource(&format!("file:///p{}.jpg", i), jpeg(300 + i as u32 * 20, 400));
    }
    let data = form("Inspection", serde_json::Value::Object(page));

    let outcome = harness.layout("Inspection", &data)?;
    let drawable = PageGeometry::default().drawable_area();
    assert!(outcome.skipped.is_empty());
    assert!(outcome.document.page_count() > 1);
    for slot in &outcome.document.slots {
        let PageSlot::Composed(page) = slot else {
            continue;
        };
        assert!(!page.blocks.is_empty());
        for block in &page.blocks {
            let bounds = block.bounds();
            assert!(drawable.contains(&bounds), "{:?}", bounds);
            if let Block::Text(text) = block {
                assert!(text.width > 0.0 || text.text.trim().is_empty());
            }
            if let Block::Image(image) = block {
                assert!(image.width <= 200.0 && image.height <= 200.0);
            }
        }
    }
    Ok(())
}

#[test]
fn test_same_input_gives_same_layout() -> TestResult {
    let harness = Harness::new();
    harness.add_resource("file:///roof.png", png(640, 480));
    let data = form(
        "Inspection",
        json!({"Roof": "Worn", "Photo": "file:///roof.png", "Extra": scalar_fields(50)}),
    );

    let first = harness.assemble("Inspection", &data)?;
    let second = harness.assemble("Inspection", &data)?;
    assert_eq!(first.page_count, second.page_count);
    assert_ne!(first.path, second.path);

    let first_pdf = GeneratedPdf::from_bytes(first.bytes)?;
    let second_pdf = GeneratedPdf::from_bytes(second.bytes)?;
    for page in 1..=first.page_count as u32 {
        assert_eq!(first_pdf.page_text(page), second_pdf.page_text(page));
    }
    Ok(())
}
