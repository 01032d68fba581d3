//! High-level document builder. [`Document`] keeps a top-down cursor on the
//! current page and turns styled text, images and tables into page content,
//! starting new pages whenever the remaining space runs out.

use crate::error::DocumentError;
use crate::image::{encode_rgb_xobject, EmbeddedImage, ImageOptions, ImagePosition};
use crate::render::{PageBuilder, PdfWriter};
use crate::style::{ParagraphStyle, StyleSheet, TableStyle, TextAlign};
use crate::table::{TableData, TableOptions, CELL_PADDING};
use crate::text::{approx_text_width, wrap_text};
use crate::units::{Margins, PageSize};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Page geometry and metadata for a new document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    pub page_size: PageSize,
    pub margins: Margins,
    pub title: Option<String>,
}

struct TemplateImage {
    resource: String,
    width: f32,
    height: f32,
    options: ImageOptions,
}

/// A PDF document under construction. Content is appended top to bottom;
/// [`Document::save`] finishes the current page and writes the file.
pub struct Document {
    path: PathBuf,
    options: DocumentOptions,
    styles: StyleSheet,
    writer: PdfWriter,
    page: PageBuilder,
    cursor: f32,
    numbering: bool,
    page_number: u32,
    template_images: BTreeMap<String, TemplateImage>,
    image_cache: HashMap<PathBuf, EmbeddedImage>,
}

impl Document {
    /// Create a document that will be written to `path`, with letter pages,
    /// one-inch margins and the built-in style presets.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, DocumentOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: DocumentOptions) -> Self {
        let page = PageBuilder::new(options.page_size.height());
        Document {
            path: path.into(),
            options,
            styles: StyleSheet::default(),
            writer: PdfWriter::new(),
            page,
            cursor: 0.0,
            numbering: false,
            page_number: 1,
            template_images: BTreeMap::new(),
            image_cache: HashMap::new(),
        }
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Replace the stylesheet wholesale, e.g. one built with
    /// [`StyleSheet::from_json`].
    pub fn set_styles(&mut self, styles: StyleSheet) {
        self.styles = styles;
    }

    /// Register or override a named paragraph style.
    pub fn define_style(&mut self, name: impl Into<String>, style: ParagraphStyle) {
        self.styles.define_style(name, style);
    }

    /// Register or override a named table style.
    pub fn define_table_style(&mut self, name: impl Into<String>, style: TableStyle) {
        self.styles.define_table_style(name, style);
    }

    fn page_width(&self) -> f32 {
        self.options.page_size.width()
    }

    fn page_height(&self) -> f32 {
        self.options.page_size.height()
    }

    fn content_width(&self) -> f32 {
        self.page_width() - self.options.margins.left - self.options.margins.right
    }

    fn usable_height(&self) -> f32 {
        self.page_height() - self.options.margins.top - self.options.margins.bottom
    }

    fn remaining_height(&self) -> f32 {
        self.usable_height() - self.cursor
    }

    /// Wrap `text` with the named paragraph style and lay it out, continuing
    /// onto further pages as needed. Blank lines in the input become empty
    /// lines in the output.
    pub fn add_section(&mut self, text: &str, style_name: &str) -> Result<(), DocumentError> {
        let style = self.styles.paragraph_style(style_name)?.clone();
        let font_resource = self.writer.font_resource(style.font);
        let lines = wrap_text(text, style.size, self.content_width());

        let mut idx = 0;
        while idx < lines.len() {
            if self.remaining_height() < style.leading {
                self.new_page()?;
            }
            let fit = ((self.remaining_height() / style.leading) as usize)
                .max(1)
                .min(lines.len() - idx);
            for line in &lines[idx..idx + fit] {
                let x = self.line_x(line, &style);
                let y = self.options.margins.top + self.cursor;
                self.page
                    .draw_text_line(x, y, line, &font_resource, style.size, style.color);
                self.cursor += style.leading;
            }
            idx += fit;
        }
        Ok(())
    }

    fn line_x(&self, line: &str, style: &ParagraphStyle) -> f32 {
        let width = approx_text_width(line, style.size);
        match style.align {
            TextAlign::Left | TextAlign::Justify => self.options.margins.left,
            TextAlign::Center => {
                self.options.margins.left + (self.content_width() - width) / 2.0
            }
            TextAlign::Right => self.options.margins.left + self.content_width() - width,
        }
    }

    /// Add several sections with the same style, in order.
    pub fn add_sections<I, S>(&mut self, texts: I, style_name: &str) -> Result<(), DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for text in texts {
            self.add_section(text.as_ref(), style_name)?;
        }
        Ok(())
    }

    /// Shorthand for [`Document::add_section`] with the `title` preset.
    pub fn add_title(&mut self, text: &str) -> Result<(), DocumentError> {
        self.add_section(text, "title")
    }

    /// Shorthand for [`Document::add_section`] with the `paragraph` preset.
    pub fn add_paragraph(&mut self, text: &str) -> Result<(), DocumentError> {
        self.add_section(text, "paragraph")
    }

    /// Move the cursor down by `points`. The cursor may run past the page
    /// edge; the next element then starts on a new page, so a trailing gap
    /// never emits a blank page.
    pub fn add_space(&mut self, points: f32) {
        self.cursor += points;
    }

    fn embed_image(&mut self, path: &Path) -> Result<EmbeddedImage, DocumentError> {
        if let Some(embedded) = self.image_cache.get(path) {
            return Ok(embedded.clone());
        }
        let decoded = image::open(path)?;
        let stream = encode_rgb_xobject(&decoded)?;
        let resource = self.writer.image_resource(stream);
        let embedded = EmbeddedImage {
            resource,
            width: decoded.width(),
            height: decoded.height(),
        };
        log::debug!(
            "embedded image {} ({}x{} px)",
            path.display(),
            embedded.width,
            embedded.height
        );
        self.image_cache.insert(path.to_path_buf(), embedded.clone());
        Ok(embedded)
    }

    /// Place an image from `path`. Flow placements advance the cursor by the
    /// image height; absolute placements leave the cursor untouched.
    pub fn add_image(&mut self, path: &Path, options: ImageOptions) -> Result<(), DocumentError> {
        options.validate()?;
        let embedded = self.embed_image(path)?;
        let (width, height) = options.target_size(embedded.width, embedded.height);

        match options.position {
            ImagePosition::Absolute => {
                let (left, bottom) =
                    options.absolute_position(self.page_width(), self.page_height(), width, height);
                let y = self.page_height() - bottom - height;
                self.page.draw_image(&embedded.resource, left, y, width, height);
            }
            ImagePosition::Default | ImagePosition::Center => {
                if height > self.remaining_height() && self.cursor > 0.0 {
                    self.new_page()?;
                }
                let x = match options.position {
                    ImagePosition::Center => (self.page_width() - width) / 2.0,
                    _ => self.options.margins.left,
                };
                let y = self.options.margins.top + self.cursor;
                self.page.draw_image(&embedded.resource, x, y, width, height);
                self.cursor += height;
            }
        }
        Ok(())
    }

    /// Register an image stamped onto every page from now on, under a
    /// caller-chosen name. One file can back several templates with
    /// different placements. Stamping happens when a page is finished.
    pub fn add_template_image(
        &mut self,
        name: impl Into<String>,
        path: &Path,
        options: ImageOptions,
    ) -> Result<(), DocumentError> {
        options.validate()?;
        let embedded = self.embed_image(path)?;
        let (width, height) = options.target_size(embedded.width, embedded.height);
        self.template_images.insert(
            name.into(),
            TemplateImage {
                resource: embedded.resource,
                width,
                height,
                options,
            },
        );
        Ok(())
    }

    /// Stop stamping the named template image.
    pub fn remove_template_image(&mut self, name: &str) {
        self.template_images.remove(name);
    }

    /// Lay out `data` as a grid. The style decides whether the first row is
    /// a header band; headers repeat at the top of every continuation page.
    pub fn add_table(&mut self, data: &TableData, options: &TableOptions) -> Result<(), DocumentError> {
        data.validate()?;
        let style = self.styles.table_style(&options.style)?.clone();
        let widths = options
            .widths
            .resolve(data, &style, self.content_width())?;
        let table_width: f32 = widths.iter().sum();
        let x0 = match options.position {
            crate::table::TablePosition::Center => {
                self.options.margins.left + (self.content_width() - table_width) / 2.0
            }
            crate::table::TablePosition::Default => self.options.margins.left,
        };
        let leading = style.leading();

        // Wrap every cell up front so row heights are known before placement.
        let wrapped: Vec<Vec<Vec<String>>> = data
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(widths.iter())
                    .map(|(cell, width)| {
                        if options.wrap {
                            wrap_text(cell, style.size, width - 2.0 * CELL_PADDING)
                        } else {
                            vec![cell.clone()]
                        }
                    })
                    .collect()
            })
            .collect();
        let row_heights: Vec<f32> = wrapped
            .iter()
            .map(|row| {
                let lines = row.iter().map(Vec::len).max().unwrap_or(1).max(1);
                lines as f32 * leading + 2.0 * CELL_PADDING
            })
            .collect();

        let header_rows = if style.header { 1 } else { 0 };
        let header_height: f32 = row_heights[..header_rows].iter().sum();
        let first_body = row_heights.get(header_rows).copied().unwrap_or(0.0);

        // A header with no body row under it gets pushed to the next page.
        if header_height + first_body > self.remaining_height() {
            self.new_page()?;
        }

        let mut row = header_rows;
        let mut page_start = true;
        loop {
            if page_start {
                for h in 0..header_rows {
                    self.draw_table_row(&wrapped[h], &widths, row_heights[h], x0, &style, true)?;
                }
                page_start = false;
            }
            if row >= wrapped.len() {
                break;
            }
            if row_heights[row] > self.remaining_height() {
                if row_heights[row] > self.usable_height() - header_height {
                    return Err(DocumentError::InvalidTable(format!(
                        "row {} is taller than a page",
                        row
                    )));
                }
                self.new_page()?;
                page_start = true;
                continue;
            }
            self.draw_table_row(&wrapped[row], &widths, row_heights[row], x0, &style, false)?;
            row += 1;
        }
        Ok(())
    }

    fn draw_table_row(
        &mut self,
        cells: &[Vec<String>],
        widths: &[f32],
        row_height: f32,
        x0: f32,
        style: &TableStyle,
        is_header: bool,
    ) -> Result<(), DocumentError> {
        if row_height > self.remaining_height() {
            self.new_page()?;
        }
        let font_resource = self.writer.font_resource(style.font);
        let y_top = self.options.margins.top + self.cursor;
        let leading = style.leading();
        let (background, text_color) = if is_header {
            (Some(style.header_background), style.header_text_color)
        } else if style.background != crate::style::Color::WHITE {
            (Some(style.background), style.text_color)
        } else {
            (None, style.text_color)
        };

        let mut x = x0;
        for (cell, width) in cells.iter().zip(widths.iter()) {
            if let Some(color) = background {
                self.page.fill_rect(x, y_top, *width, row_height, color);
            }
            self.page
                .stroke_rect(x, y_top, *width, row_height, style.grid_width, style.grid_color);
            for (i, line) in cell.iter().enumerate() {
                let text_x =
                    x + ((width - approx_text_width(line, style.size)) / 2.0).max(CELL_PADDING);
                self.page.draw_text_line(
                    text_x,
                    y_top + CELL_PADDING + i as f32 * leading,
                    line,
                    &font_resource,
                    style.size,
                    text_color,
                );
            }
            x += width;
        }
        self.cursor += row_height;
        Ok(())
    }

    /// Turn page-number stamping on or off for pages finished from now on.
    pub fn set_page_numbering(&mut self, enabled: bool) {
        self.numbering = enabled;
    }

    /// Override the number stamped on the next finished page. Later pages
    /// continue counting from it.
    pub fn set_page_number(&mut self, number: u32) {
        self.page_number = number;
    }

    fn stamp_page_chrome(&mut self) -> Result<(), DocumentError> {
        for template in self.template_images.values() {
            let (left, bottom) = template.options.absolute_position(
                self.options.page_size.width(),
                self.options.page_size.height(),
                template.width,
                template.height,
            );
            let y = self.options.page_size.height() - bottom - template.height;
            self.page
                .draw_image(&template.resource, left, y, template.width, template.height);
        }
        if self.numbering {
            let style = self.styles.paragraph_style("page_number")?.clone();
            let font_resource = self.writer.font_resource(style.font);
            let text = self.page_number.to_string();
            let x = self.options.margins.left
                + (self.content_width() - approx_text_width(&text, style.size)) / 2.0;
            let y = self.page_height() - self.options.margins.bottom / 2.0 - style.size;
            self.page
                .draw_text_line(x, y, &text, &font_resource, style.size, style.color);
        }
        Ok(())
    }

    /// Finish the current page and start a fresh one.
    pub fn new_page(&mut self) -> Result<(), DocumentError> {
        self.stamp_page_chrome()?;
        let height = self.page_height();
        let page = std::mem::replace(&mut self.page, PageBuilder::new(height));
        self.writer
            .push_page(page.finish(), self.page_width(), height)?;
        self.cursor = 0.0;
        self.page_number += 1;
        Ok(())
    }

    fn finalize(mut self) -> Result<lopdf::Document, DocumentError> {
        self.new_page()?;
        let title = self.options.title.take();
        let document = self.writer.finalize(title.as_deref())?;
        Ok(document)
    }

    /// Finish the document and write it to the path given at construction.
    pub fn save(self) -> Result<(), DocumentError> {
        let path = self.path.clone();
        let mut document = self.finalize()?;
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        document.save_to(&mut writer)?;
        log::info!("saved {}", path.display());
        Ok(())
    }

    /// Finish the document and serialize it into `writer` instead of
    /// touching the filesystem.
    pub fn save_to_writer<W: Write>(self, writer: &mut W) -> Result<(), DocumentError> {
        let mut document = self.finalize()?;
        document.save_to(writer)?;
        Ok(())
    }

    /// Finish the document and return the serialized bytes.
    pub fn save_to_bytes(self) -> Result<Vec<u8>, DocumentError> {
        let mut bytes = Vec::new();
        self.save_to_writer(&mut bytes)?;
        Ok(bytes)
    }
}
