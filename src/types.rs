//! Core page-object and render types
//!
//! Host-facing views over engine state. Descriptors are snapshots taken
//! while a page is loaded; they do not track later mutations.

use std::fmt;
use std::io::Cursor;

use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, Result};

/// Kind of a page object, as reported by the engine.
///
/// Closed set; engines report anything they cannot classify as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Text,
    Path,
    Image,
    Shading,
    Form,
    Unknown,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectKind::Text => "text",
            ObjectKind::Path => "path",
            ObjectKind::Image => "image",
            ObjectKind::Shading => "shading",
            ObjectKind::Form => "form",
            ObjectKind::Unknown => "unknown",
        })
    }
}

/// Axis-aligned bounding rectangle in page-space points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ObjectBounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        (self.top - self.bottom).abs()
    }
}

/// Read-only view over one object on a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageObjectDescriptor {
    /// Ordinal index in engine paint order, stable within one page load.
    pub id: u32,
    /// Object type tag.
    pub kind: ObjectKind,
    /// Bounding rectangle in page-space points.
    pub bounds: ObjectBounds,
}

/// Image payload format for object replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
}

impl ImageFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
        })
    }
}

/// A rasterized page: packed RGBA8 pixels in row-major order.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Pixel data, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl RenderResult {
    /// Convert the raw buffer into an [`image::RgbaImage`].
    pub fn into_rgba_image(self) -> Result<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels).ok_or_else(|| {
            DocumentError::Image("pixel buffer does not match render dimensions".to_string())
        })
    }

    /// Encode the buffer as PNG, for hosts that want a portable payload
    /// instead of raw pixels.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| {
                DocumentError::Image("pixel buffer does not match render dimensions".to_string())
            })?;

        let mut output = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)
            .map_err(|e| DocumentError::Image(e.to_string()))?;

        Ok(output)
    }
}
