//! Style presets for paragraphs and tables.
//!
//! A [`StyleSheet`] is a named registry of [`ParagraphStyle`] and [`TableStyle`]
//! definitions. Every [`Document`](crate::Document) starts with the built-in
//! presets (`title`, `paragraph`, `page_number`, `table`, `no_header`) and
//! callers register additional styles under their own names.

use crate::error::DocumentError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Color { r: value, g: value, b: value }
    }

    /// Parse a hex color string (#RGB or #RRGGBB format).
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Color must start with #, got: {}", s))?;

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16)
                    .map_err(|e| format!("Invalid red component: {}", e))?;
                let g = u8::from_str_radix(&hex[2..4], 16)
                    .map_err(|e| format!("Invalid green component: {}", e))?;
                let b = u8::from_str_radix(&hex[4..6], 16)
                    .map_err(|e| format!("Invalid blue component: {}", e))?;
                Ok(Color { r, g, b })
            }
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map { r: u8, g: u8, b: u8 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Color::parse_hex(&s).map_err(de::Error::custom),
            ColorDef::Map { r, g, b } => Ok(Color { r, g, b }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl Default for TextAlign {
    fn default() -> Self {
        TextAlign::Left
    }
}

/// The standard base-14 faces. These need no font embedding; every PDF viewer
/// ships their metrics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Font {
    #[serde(rename = "Helvetica")]
    Helvetica,
    #[serde(rename = "Helvetica-Bold")]
    HelveticaBold,
    #[serde(rename = "Helvetica-Oblique")]
    HelveticaOblique,
    #[serde(rename = "Helvetica-BoldOblique")]
    HelveticaBoldOblique,
    #[serde(rename = "Times-Roman")]
    TimesRoman,
    #[serde(rename = "Times-Bold")]
    TimesBold,
    #[serde(rename = "Times-Italic")]
    TimesItalic,
    #[serde(rename = "Times-BoldItalic")]
    TimesBoldItalic,
    #[serde(rename = "Courier")]
    Courier,
    #[serde(rename = "Courier-Bold")]
    CourierBold,
    #[serde(rename = "Courier-Oblique")]
    CourierOblique,
    #[serde(rename = "Courier-BoldOblique")]
    CourierBoldOblique,
}

impl Default for Font {
    fn default() -> Self {
        Font::Helvetica
    }
}

impl Font {
    pub fn postscript_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Font::TimesRoman => "Times-Roman",
            Font::TimesBold => "Times-Bold",
            Font::TimesItalic => "Times-Italic",
            Font::TimesBoldItalic => "Times-BoldItalic",
            Font::Courier => "Courier",
            Font::CourierBold => "Courier-Bold",
            Font::CourierOblique => "Courier-Oblique",
            Font::CourierBoldOblique => "Courier-BoldOblique",
        }
    }
}

/// Formatting attributes for a run of flowed text.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParagraphStyle {
    pub font: Font,
    pub size: f32,
    /// Line advance in points. Defaults to `size`.
    pub leading: f32,
    pub align: TextAlign,
    pub color: Color,
}

impl ParagraphStyle {
    pub fn new(font: Font, size: f32) -> Self {
        ParagraphStyle {
            font,
            size,
            leading: size,
            align: TextAlign::Left,
            color: Color::BLACK,
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        ParagraphStyle::new(Font::Helvetica, 12.0).with_align(TextAlign::Justify)
    }
}

impl<'de> Deserialize<'de> for ParagraphStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            font: Font,
            size: Option<f32>,
            leading: Option<f32>,
            #[serde(default)]
            align: TextAlign,
            #[serde(default)]
            color: Color,
        }

        let raw = Raw::deserialize(deserializer)?;
        let size = raw.size.unwrap_or(12.0);
        Ok(ParagraphStyle {
            font: raw.font,
            size,
            leading: raw.leading.unwrap_or(size),
            align: raw.align,
            color: raw.color,
        })
    }
}

/// Formatting attributes for a table: cell font, fill and grid colors, and the
/// optional header band drawn over the first row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableStyle {
    pub header: bool,
    pub font: Font,
    pub size: f32,
    pub text_color: Color,
    pub background: Color,
    pub grid_color: Color,
    pub grid_width: f32,
    pub header_background: Color,
    pub header_text_color: Color,
}

impl Default for TableStyle {
    fn default() -> Self {
        TableStyle {
            header: true,
            font: Font::HelveticaBold,
            size: 8.0,
            text_color: Color::BLACK,
            background: Color::WHITE,
            grid_color: Color::BLACK,
            grid_width: 1.0,
            header_background: Color::gray(128),
            header_text_color: Color::WHITE,
        }
    }
}

impl TableStyle {
    /// Cell line advance; mirrors the paragraph leading of wrapped cell text.
    pub fn leading(&self) -> f32 {
        self.size + 2.0
    }
}

/// Named registries for paragraph and table styles.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    paragraph_styles: HashMap<String, ParagraphStyle>,
    table_styles: HashMap<String, TableStyle>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        let mut paragraph_styles = HashMap::new();
        paragraph_styles.insert(
            "title".to_string(),
            ParagraphStyle::new(Font::HelveticaBold, 14.0),
        );
        paragraph_styles.insert("paragraph".to_string(), ParagraphStyle::default());
        paragraph_styles.insert(
            "page_number".to_string(),
            ParagraphStyle::new(Font::Helvetica, 12.0).with_align(TextAlign::Center),
        );

        let mut table_styles = HashMap::new();
        table_styles.insert("table".to_string(), TableStyle::default());
        table_styles.insert(
            "no_header".to_string(),
            TableStyle {
                header: false,
                header_background: Color::WHITE,
                header_text_color: Color::BLACK,
                ..TableStyle::default()
            },
        );

        StyleSheet { paragraph_styles, table_styles }
    }
}

impl StyleSheet {
    /// Load style definitions from JSON, layered over the built-in presets.
    ///
    /// ```json
    /// {
    ///   "paragraph_styles": { "caption": { "size": 6, "align": "Center" } },
    ///   "table_styles": { "plain": { "header": false } }
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        #[serde(default)]
        struct Def {
            paragraph_styles: HashMap<String, ParagraphStyle>,
            table_styles: HashMap<String, TableStyle>,
        }
        impl Default for Def {
            fn default() -> Self {
                Def { paragraph_styles: HashMap::new(), table_styles: HashMap::new() }
            }
        }

        let def: Def = serde_json::from_str(json)?;
        let mut sheet = StyleSheet::default();
        sheet.paragraph_styles.extend(def.paragraph_styles);
        sheet.table_styles.extend(def.table_styles);
        Ok(sheet)
    }

    pub fn define_style(&mut self, name: impl Into<String>, style: ParagraphStyle) {
        self.paragraph_styles.insert(name.into(), style);
    }

    pub fn define_table_style(&mut self, name: impl Into<String>, style: TableStyle) {
        self.table_styles.insert(name.into(), style);
    }

    pub fn paragraph_style(&self, name: &str) -> Result<&ParagraphStyle, DocumentError> {
        self.paragraph_styles
            .get(name)
            .ok_or_else(|| DocumentError::UnknownStyle(name.to_string()))
    }

    pub fn table_style(&self, name: &str) -> Result<&TableStyle, DocumentError> {
        self.table_styles
            .get(name)
            .ok_or_else(|| DocumentError::UnknownTableStyle(name.to_string()))
    }
}
