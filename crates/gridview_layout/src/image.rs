//! Image elements and pixel preparation
//!
//! The [`Image`] builder takes part in layout like any other element. The
//! pixels themselves are prepared by [`ImageData`], which decodes an asset
//! and applies the element's fit and clip so a renderer can blit the result
//! as-is.

use std::path::Path;

use gridview_core::Color;
use ::image::imageops::{self, FilterType};
use ::image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use taffy::prelude::*;

use crate::div::ElementBuilder;
use crate::element::{ElementTypeId, RenderProps};
use crate::error::{LayoutError, Result};
use crate::tree::{LayoutNodeId, LayoutTree};

/// How image pixels fill the element box
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectFit {
    /// Scale to cover the box, cropping the overflow
    #[default]
    Cover,
    /// Stretch to the box, ignoring aspect ratio
    Fill,
}

/// Shape the image is clipped to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipShape {
    #[default]
    None,
    Circle,
}

/// Image render data extracted from the element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageRenderInfo {
    /// Asset name or path
    pub source: String,
    pub fit: ObjectFit,
    pub clip: ClipShape,
    /// Inset of the drawn pixels from the element box
    pub inset: f32,
}

/// An image element builder
pub struct Image {
    source: String,
    size: f32,
    inset: f32,
    fit: ObjectFit,
    clip: ClipShape,
}

impl Image {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            size: 48.0,
            inset: 0.0,
            fit: ObjectFit::Cover,
            clip: ClipShape::None,
        }
    }

    /// Set the square box size in pixels
    pub fn size(mut self, px: f32) -> Self {
        self.size = px;
        self
    }

    /// Inset the drawn pixels inside the box
    pub fn padding(mut self, px: f32) -> Self {
        self.inset = px;
        self
    }

    pub fn fit(mut self, fit: ObjectFit) -> Self {
        self.fit = fit;
        self
    }

    pub fn clip(mut self, clip: ClipShape) -> Self {
        self.clip = clip;
        self
    }
}

impl ElementBuilder for Image {
    fn build(&self, tree: &mut LayoutTree) -> Result<LayoutNodeId> {
        tree.create_node(Style {
            size: Size {
                width: length(self.size),
                height: length(self.size),
            },
            flex_shrink: 0.0,
            ..Default::default()
        })
    }

    fn render_props(&self) -> RenderProps {
        RenderProps::default()
    }

    fn children_builders(&self) -> &[Box<dyn ElementBuilder>] {
        &[]
    }

    fn element_type_id(&self) -> ElementTypeId {
        ElementTypeId::Image
    }

    fn image_render_info(&self) -> Option<ImageRenderInfo> {
        Some(ImageRenderInfo {
            source: self.source.clone(),
            fit: self.fit,
            clip: self.clip,
            inset: self.inset,
        })
    }
}

/// Convenience function to create a new image element
pub fn image(source: impl Into<String>) -> Image {
    Image::new(source)
}

// ============================================================================
// Pixel data
// ============================================================================

/// Decoded RGBA image
#[derive(Debug, Clone)]
pub struct ImageData {
    pixels: RgbaImage,
}

impl ImageData {
    /// Create ImageData from raw RGBA pixels
    pub fn from_rgba(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        let actual = pixels.len();
        RgbaImage::from_raw(width, height, pixels)
            .map(|pixels| Self { pixels })
            .ok_or(LayoutError::PixelLength { expected, actual })
    }

    /// Fill a new image with a single color
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let rgba = color.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba(rgba)),
        }
    }

    /// Decode an image from encoded bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = ::image::load_from_memory(data)?;
        Ok(Self {
            pixels: img.to_rgba8(),
        })
    }

    /// Read and decode an image file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("decoding image {} ({} bytes)", path.display(), data.len());
        Self::from_bytes(&data)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw RGBA pixel data
    pub fn pixels(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// RGBA value of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    fn ensure_not_empty(&self) -> Result<()> {
        if self.width() == 0 || self.height() == 0 {
            return Err(LayoutError::InvalidImageSize {
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    /// Crop the largest centered square
    pub fn crop_square_center(&self) -> Result<Self> {
        self.ensure_not_empty()?;
        let side = self.width().min(self.height());
        let x = (self.width() - side) / 2;
        let y = (self.height() - side) / 2;
        Ok(Self {
            pixels: imageops::crop_imm(&self.pixels, x, y, side, side).to_image(),
        })
    }

    /// Resize to exactly `width` x `height`
    pub fn resize(&self, width: u32, height: u32) -> Result<Self> {
        self.ensure_not_empty()?;
        if width == 0 || height == 0 {
            return Err(LayoutError::InvalidImageSize { width, height });
        }
        Ok(Self {
            pixels: imageops::resize(&self.pixels, width, height, FilterType::Triangle),
        })
    }

    /// Make every pixel outside the inscribed circle fully transparent
    pub fn clip_circle(&mut self) {
        let (w, h) = (self.width() as f32, self.height() as f32);
        let radius = w.min(h) / 2.0;
        let (cx, cy) = (w / 2.0, h / 2.0);
        for (x, y, pixel) in self.pixels.enumerate_pixels_mut() {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy > radius * radius {
                pixel.0[3] = 0;
            }
        }
    }

    /// Prepare pixels for a square element of `side` pixels
    pub fn fit_to(&self, side: u32, fit: ObjectFit, clip: ClipShape) -> Result<Self> {
        let mut out = match fit {
            ObjectFit::Cover => self.crop_square_center()?.resize(side, side)?,
            ObjectFit::Fill => self.resize(side, side)?,
        };
        if clip == ClipShape::Circle {
            out.clip_circle();
        }
        Ok(out)
    }
}
