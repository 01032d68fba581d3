//! Image placement options and XObject encoding.
//!
//! Decoding is delegated to the `image` crate; pixels are flattened to RGB8
//! and embedded as a Flate-compressed `DeviceRGB` XObject. One drawn pixel is
//! one point before scaling.

use crate::error::DocumentError;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Stream};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImagePosition {
    /// In flow, flush with the left margin.
    Default,
    /// In flow, horizontally centered.
    Center,
    /// Anchored to the page edges; does not consume vertical space.
    Absolute,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageOptions {
    /// Overall scaling applied to the pixel dimensions.
    pub scale: f32,
    pub width_factor: f32,
    pub height_factor: f32,
    pub position: ImagePosition,
    /// Offset from the horizontal anchor, absolute placement only.
    pub x: f32,
    /// Offset from the vertical anchor, absolute placement only.
    pub y: f32,
    pub anchor_x: HorizontalAnchor,
    pub anchor_y: VerticalAnchor,
}

impl Default for ImageOptions {
    fn default() -> Self {
        ImageOptions {
            scale: 1.0,
            width_factor: 1.0,
            height_factor: 1.0,
            position: ImagePosition::Default,
            x: 0.0,
            y: 0.0,
            anchor_x: HorizontalAnchor::Left,
            anchor_y: VerticalAnchor::Top,
        }
    }
}

impl ImageOptions {
    pub fn scaled(scale: f32) -> Self {
        ImageOptions { scale, ..Default::default() }
    }

    pub fn centered() -> Self {
        ImageOptions { position: ImagePosition::Center, ..Default::default() }
    }

    pub fn absolute(anchor_x: HorizontalAnchor, anchor_y: VerticalAnchor, x: f32, y: f32) -> Self {
        ImageOptions {
            position: ImagePosition::Absolute,
            anchor_x,
            anchor_y,
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: ImagePosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), DocumentError> {
        if self.scale <= 0.0 || self.width_factor <= 0.0 || self.height_factor <= 0.0 {
            return Err(DocumentError::InvalidOption(
                "image scale and size factors must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Drawn size in points for an image of `width` x `height` pixels.
    pub(crate) fn target_size(&self, width: u32, height: u32) -> (f32, f32) {
        (
            width as f32 * self.scale * self.width_factor,
            height as f32 * self.scale * self.height_factor,
        )
    }

    /// Lower-left corner in PDF coordinates for absolute placement.
    ///
    /// Offsets move the image inward from the chosen edge: `x` pushes away
    /// from the left/right anchor, `y` pushes down from the top (or up from
    /// the bottom).
    pub(crate) fn absolute_position(
        &self,
        page_width: f32,
        page_height: f32,
        img_width: f32,
        img_height: f32,
    ) -> (f32, f32) {
        let left = match self.anchor_x {
            HorizontalAnchor::Right => page_width - img_width - self.x,
            HorizontalAnchor::Center => (page_width - img_width) / 2.0 + self.x,
            HorizontalAnchor::Left => self.x,
        };
        let bottom = match self.anchor_y {
            VerticalAnchor::Bottom => self.y,
            VerticalAnchor::Center => (page_height - img_height) / 2.0 - self.y,
            VerticalAnchor::Top => page_height - img_height - self.y,
        };
        (left, bottom)
    }
}

/// A decoded image registered with the document's resource dictionary.
#[derive(Debug, Clone)]
pub(crate) struct EmbeddedImage {
    /// XObject resource name, e.g. `Im1`.
    pub resource: String,
    pub width: u32,
    pub height: u32,
}

/// Flatten to RGB8 and build the image XObject stream.
pub(crate) fn encode_rgb_xobject(img: &image::DynamicImage) -> Result<Stream, DocumentError> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(rgb.as_raw())?;
    let compressed = encoder.finish()?;

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    Ok(Stream::new(dict, compressed))
}
