//! Point-based measurements. All public dimensions are PDF points (1/72 inch).

use serde::{Deserialize, Serialize};

pub const INCH: f32 = 72.0;
pub const CM: f32 = 28.35;
pub const MM: f32 = 2.835;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum PageSize {
    Letter,
    A4,
    Legal,
    Custom { width: f32, height: f32 },
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Letter
    }
}

impl PageSize {
    pub fn width(&self) -> f32 {
        match self {
            PageSize::Letter => 612.0,
            PageSize::A4 => 595.0,
            PageSize::Legal => 612.0,
            PageSize::Custom { width, .. } => *width,
        }
    }

    pub fn height(&self) -> f32 {
        match self {
            PageSize::Letter => 792.0,
            PageSize::A4 => 842.0,
            PageSize::Legal => 1008.0,
            PageSize::Custom { height, .. } => *height,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Margins { top: INCH, right: INCH, bottom: INCH, left: INCH }
    }
}

impl Margins {
    pub fn uniform(value: f32) -> Self {
        Margins { top: value, right: value, bottom: value, left: value }
    }
}
