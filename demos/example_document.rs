//! Builds a small showcase document: a cover page, styled sections, a
//! template watermark, page numbers, images and two tables.
//!
//! Run with `cargo run --example example_document`; it writes
//! `example_document.pdf` and the generated `example.png` it embeds into
//! the current directory.

use image::{Rgb, RgbImage};
use pagecraft::{
    Color, ColumnWidths, Document, DocumentError, Font, HorizontalAnchor, ImageOptions,
    ImagePosition, ParagraphStyle, TableData, TableOptions, TableStyle, TextAlign, VerticalAnchor,
};
use std::path::Path;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
    Sed vel feugiat mauris. Nullam tincidunt quam eget arcu mattis ornare. Sed \
    porttitor leo ut nisi molestie, non lobortis purus pharetra. Phasellus \
    dignissim libero odio, nec blandit nibh euismod nec. Nunc bibendum \
    malesuada nisl sed bibendum. Etiam sit amet est nec mauris ultricies \
    convallis sit amet sed nisl. Cras placerat in odio eu pretium.";

fn write_sample_image(path: &Path) -> Result<(), image::ImageError> {
    let mut img = RgbImage::new(160, 120);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([(x + 40) as u8, (y + 80) as u8, 200]);
    }
    img.save(path)
}

fn main() -> Result<(), DocumentError> {
    env_logger::init();

    let image_path = Path::new("example.png");
    write_sample_image(image_path)?;

    let mut doc = Document::new("example_document.pdf");
    doc.define_style(
        "cover_title",
        ParagraphStyle::new(Font::HelveticaBold, 48.0).with_align(TextAlign::Center),
    );
    doc.define_style("large_title", ParagraphStyle::new(Font::HelveticaBold, 20.0));
    doc.define_style(
        "caption",
        ParagraphStyle::new(Font::HelveticaBold, 6.0)
            .with_align(TextAlign::Center)
            .with_color(Color::rgb(255, 0, 0)),
    );
    doc.define_table_style(
        "shaded",
        TableStyle {
            header: false,
            background: Color::gray(230),
            text_color: Color::rgb(0, 0, 128),
            ..TableStyle::default()
        },
    );

    // Cover page.
    doc.add_space(100.0);
    doc.add_section("Example Document", "cover_title")?;
    doc.add_space(70.0);
    doc.add_image(
        image_path,
        ImageOptions::scaled(1.5).with_position(ImagePosition::Center),
    )?;
    doc.new_page()?;

    // Page numbers and a corner watermark on every page from here on.
    doc.set_page_numbering(true);
    doc.add_template_image(
        "watermark",
        image_path,
        ImageOptions::absolute(HorizontalAnchor::Right, VerticalAnchor::Top, 10.0, 20.0)
            .with_scale(0.2),
    )?;

    doc.add_section("Title Example", "large_title")?;
    doc.add_space(12.0);

    doc.add_title("Section 1")?;
    doc.add_space(12.0);
    doc.add_paragraph(LOREM)?;
    doc.add_paragraph(LOREM)?;
    doc.add_image(image_path, ImageOptions::centered())?;
    doc.add_section("Example image", "caption")?;
    doc.add_space(12.0);
    doc.add_paragraph(LOREM)?;
    doc.add_paragraph(LOREM)?;
    doc.add_space(12.0);

    doc.add_title("Section 2")?;
    doc.add_space(12.0);
    doc.add_paragraph(LOREM)?;
    doc.add_space(15.0);
    let table = TableData::from_rows(vec![
        vec!["Table Header 1", "Table Header 2"],
        vec!["Table Text 1", "Table Text 2"],
        vec!["Table Text 3", "Table Text 4"],
    ]);
    doc.add_table(
        &table,
        &TableOptions::default().with_widths(ColumnWidths::Fixed(vec![100.0, 100.0])),
    )?;
    doc.add_space(2.0);
    doc.add_section("Example table", "caption")?;
    doc.add_space(12.0);
    doc.add_paragraph(LOREM)?;
    doc.add_space(15.0);
    let shaded = TableData::from_rows(vec![vec!["Example"; 8]; 5]);
    doc.add_table(
        &shaded,
        &TableOptions::default()
            .with_widths(ColumnWidths::Uniform)
            .with_style("shaded"),
    )?;
    doc.add_space(2.0);
    doc.add_section("Example table with no header", "caption")?;

    doc.save()
}
