//! The lopdf backend. [`PdfWriter`] owns the document object graph and the
//! shared resources dictionary; [`PageBuilder`] accumulates content-stream
//! operations for one page.
//!
//! Callers work in top-left-origin coordinates; conversion to PDF's
//! bottom-left origin happens when operations are emitted.

use crate::error::DocumentError;
use crate::style::{Color, Font};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::io::Write;

/// Text fraction of the font size between line top and baseline.
const BASELINE_FACTOR: f32 = 0.8;

pub(crate) struct PdfWriter {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    fonts: Vec<(Font, ObjectId)>,
    xobjects: Vec<ObjectId>,
}

impl PdfWriter {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        PdfWriter {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            fonts: Vec::new(),
            xobjects: Vec::new(),
        }
    }

    /// Register a base-14 font and return its resource name (`F1`, `F2`, ...).
    /// Registering the same face twice returns the existing name.
    pub fn font_resource(&mut self, font: Font) -> String {
        if let Some(idx) = self.fonts.iter().position(|(f, _)| *f == font) {
            return format!("F{}", idx + 1);
        }
        let font_id = self.document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.postscript_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        self.fonts.push((font, font_id));
        format!("F{}", self.fonts.len())
    }

    /// Register an image XObject stream and return its resource name
    /// (`Im1`, `Im2`, ...).
    pub fn image_resource(&mut self, stream: Stream) -> String {
        let id = self.document.add_object(stream);
        self.xobjects.push(id);
        format!("Im{}", self.xobjects.len())
    }

    /// Compress and append a finished page.
    pub fn push_page(
        &mut self,
        content: Content,
        page_width: f32,
        page_height: f32,
    ) -> Result<(), DocumentError> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content.encode()?)?;
        let compressed = encoder.finish()?;
        let content_stream =
            Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed);
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        log::debug!("finished page {}", self.page_ids.len());
        Ok(())
    }

    /// Wire up resources, page tree, catalog and metadata, and return the
    /// completed document.
    pub fn finalize(mut self, title: Option<&str>) -> Result<Document, DocumentError> {
        let mut font_dict = Dictionary::new();
        for (idx, (_, font_id)) in self.fonts.iter().enumerate() {
            font_dict.set(format!("F{}", idx + 1).into_bytes(), *font_id);
        }
        let mut resources_dict = dictionary! { "Font" => font_dict };
        if !self.xobjects.is_empty() {
            let mut xobject_dict = Dictionary::new();
            for (idx, id) in self.xobjects.iter().enumerate() {
                xobject_dict.set(format!("Im{}", idx + 1).into_bytes(), *id);
            }
            resources_dict.set("XObject", xobject_dict);
        }
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources_dict));

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i32,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self
            .document
            .add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.document.trailer.set("Root", catalog_id);

        let creation_date = chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string();
        let mut info = dictionary! {
            "Producer" => Object::string_literal("pagecraft"),
            "CreationDate" => Object::string_literal(creation_date),
        };
        if let Some(title) = title {
            info.set("Title", Object::String(to_win_ansi(title), StringFormat::Literal));
        }
        let info_id = self.document.add_object(info);
        self.document.trailer.set("Info", info_id);

        Ok(self.document)
    }
}

#[derive(Default, Clone, PartialEq)]
struct DrawState {
    font: String,
    font_size: f32,
    fill: Option<Color>,
}

/// Content-stream builder for a single page. Redundant font and fill-color
/// changes are elided; both persist across text sections within a stream.
pub(crate) struct PageBuilder {
    page_height: f32,
    content: Content,
    state: DrawState,
}

impl PageBuilder {
    pub fn new(page_height: f32) -> Self {
        PageBuilder {
            page_height,
            content: Content { operations: vec![] },
            state: DrawState::default(),
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    fn set_font(&mut self, resource: &str, size: f32) {
        if self.state.font != resource || self.state.font_size != size {
            self.content.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(resource.as_bytes().to_vec()), size.into()],
            ));
            self.state.font = resource.to_string();
            self.state.font_size = size;
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill != Some(color) {
            self.content.operations.push(Operation::new(
                "rg",
                vec![
                    (color.r as f32 / 255.0).into(),
                    (color.g as f32 / 255.0).into(),
                    (color.b as f32 / 255.0).into(),
                ],
            ));
            self.state.fill = Some(color);
        }
    }

    /// Draw one line of text with its top edge at `y` (top-left origin).
    pub fn draw_text_line(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font_resource: &str,
        size: f32,
        color: Color,
    ) {
        if text.trim().is_empty() {
            return;
        }
        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(font_resource, size);
        self.set_fill_color(color);
        let baseline_y = y + size * BASELINE_FACTOR;
        let pdf_y = self.page_height - baseline_y;
        self.content
            .operations
            .push(Operation::new("Td", vec![x.into(), pdf_y.into()]));
        self.content.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        self.content.operations.push(Operation::new("ET", vec![]));
    }

    /// Fill a rectangle whose top-left corner is at (`x`, `y`).
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.set_fill_color(color);
        let pdf_y = self.page_height - (y + height);
        self.content.operations.push(Operation::new(
            "re",
            vec![x.into(), pdf_y.into(), width.into(), height.into()],
        ));
        self.content.operations.push(Operation::new("f", vec![]));
    }

    /// Stroke a rectangle outline whose top-left corner is at (`x`, `y`).
    pub fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Color,
    ) {
        self.content
            .operations
            .push(Operation::new("w", vec![line_width.into()]));
        self.content.operations.push(Operation::new(
            "RG",
            vec![
                (color.r as f32 / 255.0).into(),
                (color.g as f32 / 255.0).into(),
                (color.b as f32 / 255.0).into(),
            ],
        ));
        let pdf_y = self.page_height - (y + height);
        self.content.operations.push(Operation::new(
            "re",
            vec![x.into(), pdf_y.into(), width.into(), height.into()],
        ));
        self.content.operations.push(Operation::new("S", vec![]));
    }

    /// Place an image XObject with its top edge at `y` (top-left origin),
    /// scaled to `width` x `height` points.
    pub fn draw_image(&mut self, resource: &str, x: f32, y: f32, width: f32, height: f32) {
        let pdf_y = self.page_height - (y + height);
        self.content.operations.push(Operation::new("q", vec![]));
        self.content.operations.push(Operation::new(
            "cm",
            vec![
                width.into(),
                0.into(),
                0.into(),
                height.into(),
                x.into(),
                pdf_y.into(),
            ],
        ));
        self.content.operations.push(Operation::new(
            "Do",
            vec![Object::Name(resource.as_bytes().to_vec())],
        ));
        self.content.operations.push(Operation::new("Q", vec![]));
    }
}

/// WinAnsi is close enough to Latin-1 for the base-14 use case; anything
/// outside that range is replaced.
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if (c as u32) <= 255 { c as u8 } else { b'?' })
        .collect()
}
