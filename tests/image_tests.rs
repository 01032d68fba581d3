mod common;

use common::{GeneratedPdf, TestResult};
use image::{Rgb, RgbImage};
use lopdf::Object;
use pagecraft::{Document, HorizontalAnchor, ImageOptions, VerticalAnchor};
use std::path::{Path, PathBuf};

fn write_test_png(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([(x * 40) as u8, (y * 40) as u8, 128]);
    }
    let path = dir.join(name);
    img.save(&path)?;
    Ok(path)
}

fn xobject_count(pdf: &GeneratedPdf, page: u32) -> Result<usize, Box<dyn std::error::Error>> {
    let resources = pdf.page_resources(page)?;
    match resources.get(b"XObject") {
        Ok(Object::Dictionary(dict)) => Ok(dict.len()),
        Ok(other) => Err(format!("unexpected XObject entry: {:?}", other).into()),
        Err(_) => Ok(0),
    }
}

#[test]
fn flow_image_is_embedded_once() -> TestResult {
    common::init_logging();
    let dir = tempfile::tempdir()?;
    let png = write_test_png(dir.path(), "pixels.png", 6, 4)?;

    let mut doc = Document::new("unused.pdf");
    doc.add_image(&png, ImageOptions::default())?;
    doc.add_image(&png, ImageOptions::scaled(2.0))?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;
    assert_eq!(pdf.page_count(), 1);
    assert_eq!(xobject_count(&pdf, 1)?, 1);
    Ok(())
}

#[test]
fn absolute_image_does_not_consume_flow_space() -> TestResult {
    let dir = tempfile::tempdir()?;
    let png = write_test_png(dir.path(), "corner.png", 8, 8)?;

    let mut doc = Document::new("unused.pdf");
    doc.add_image(
        &png,
        ImageOptions::absolute(HorizontalAnchor::Right, VerticalAnchor::Bottom, 10.0, 10.0),
    )?;
    doc.add_paragraph("text still starts at the top")?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;
    assert_eq!(pdf.page_count(), 1);
    assert_pdf_contains_text!(pdf, 1, "text still starts");
    Ok(())
}

#[test]
fn oversized_flow_image_starts_a_new_page() -> TestResult {
    let dir = tempfile::tempdir()?;
    let png = write_test_png(dir.path(), "tall.png", 10, 700)?;

    let mut doc = Document::new("unused.pdf");
    doc.add_paragraph("before the image")?;
    doc.add_image(&png, ImageOptions::default())?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;
    assert_eq!(pdf.page_count(), 2);
    assert_eq!(xobject_count(&pdf, 1)?, 1);
    Ok(())
}

#[test]
fn template_image_is_stamped_on_every_page() -> TestResult {
    let dir = tempfile::tempdir()?;
    let png = write_test_png(dir.path(), "letterhead.png", 20, 10)?;

    let mut doc = Document::new("unused.pdf");
    doc.add_template_image(
        "letterhead",
        &png,
        ImageOptions::absolute(HorizontalAnchor::Center, VerticalAnchor::Top, 0.0, 20.0),
    )?;
    doc.add_paragraph("page one")?;
    doc.new_page()?;
    doc.add_paragraph("page two")?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;
    assert_eq!(pdf.page_count(), 2);
    assert_eq!(xobject_count(&pdf, 1)?, 1);
    assert_eq!(xobject_count(&pdf, 2)?, 1);
    Ok(())
}

#[test]
fn one_file_backs_several_templates() -> TestResult {
    let dir = tempfile::tempdir()?;
    let png = write_test_png(dir.path(), "logo.png", 16, 8)?;

    let mut doc = Document::new("unused.pdf");
    doc.add_template_image(
        "header",
        &png,
        ImageOptions::absolute(HorizontalAnchor::Left, VerticalAnchor::Top, 10.0, 10.0),
    )?;
    doc.add_template_image(
        "footer",
        &png,
        ImageOptions::absolute(HorizontalAnchor::Right, VerticalAnchor::Bottom, 10.0, 10.0)
            .with_scale(0.5),
    )?;
    doc.add_paragraph("body")?;
    let pdf = GeneratedPdf::from_bytes(&doc.save_to_bytes()?)?;

    // One decoded XObject, drawn twice with different placements.
    assert_eq!(xobject_count(&pdf, 1)?, 1);
    let pages = pdf.doc.get_pages();
    let content = pdf.doc.get_page_content(pages[&1])?;
    let decoded = lopdf::content::Content::decode(&content)?;
    let draws = decoded
        .operations
        .iter()
        .filter(|op| op.operator == "Do")
        .count();
    assert_eq!(draws, 2);
    Ok(())
}

#[test]
fn removed_template_stops_stamping() -> TestResult {
    let dir = tempfile::tempdir()?;
    let png = write_test_png(dir.path(), "stamp.png", 4, 4)?;

    let mut doc = Document::new("unused.pdf");
    doc.add_template_image("stamp", &png, ImageOptions::default())?;
    doc.add_paragraph("stamped page")?;
    doc.new_page()?;
    doc.remove_template_image("stamp");
    doc.add_paragraph("plain page")?;
    let bytes = doc.save_to_bytes()?;
    let pdf = GeneratedPdf::from_bytes(&bytes)?;

    let first = pdf.page_text(1)?;
    assert!(first.contains("stamped page"));
    // The resources dictionary is shared, so check the content stream of the
    // second page for a Do operator instead.
    let pages = pdf.doc.get_pages();
    let content = pdf.doc.get_page_content(pages[&2])?;
    let decoded = lopdf::content::Content::decode(&content)?;
    assert!(!decoded.operations.iter().any(|op| op.operator == "Do"));
    Ok(())
}

#[test]
fn missing_image_file_is_an_error() {
    let mut doc = Document::new("unused.pdf");
    let err = doc
        .add_image(Path::new("/no/such/image.png"), ImageOptions::default())
        .unwrap_err();
    assert!(matches!(err, pagecraft::DocumentError::Io(_) | pagecraft::DocumentError::Image(_)));
}
