//! Text mask rendering.
//!
//! The encoder does not care how a text becomes pixels; it consumes a
//! coverage mask of the target size through [`TextMaskRenderer`]. The default
//! backend rasterizes TrueType/OpenType glyphs and tiles them, rotated,
//! across the whole image.

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{imageops, GrayImage, Luma};
use imageproc::drawing::{draw_text_mut, text_size};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};

use crate::error::MoireError;
use crate::result::Result;

/// Pixel height of a glyph at scale 1.0.
const BASE_GLYPH_PX: f32 = 32.0;

/// Placement of the tiled text: size, rotation and repetition spacing.
///
/// Positive angles rotate the text counter-clockwise. The spacing multipliers
/// scale the step between repeated text instances relative to the rotated
/// text extent; letter spacing is extra pixels between characters within one
/// instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextRenderConfig {
    scale: f32,
    angle_degrees: f32,
    spacing_x: f32,
    spacing_y: f32,
    letter_spacing: i32,
}

impl Default for TextRenderConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            angle_degrees: 45.0,
            spacing_x: 1.4,
            spacing_y: 0.4,
            letter_spacing: 0,
        }
    }
}

impl TextRenderConfig {
    pub fn new(
        scale: f32,
        angle_degrees: f32,
        spacing_x: f32,
        spacing_y: f32,
        letter_spacing: i32,
    ) -> Result<Self> {
        if !(scale > 0.0) {
            return Err(MoireError::InvalidParameter(format!(
                "font scale must be positive, got {scale}"
            )));
        }
        if !(spacing_x > 0.0) || !(spacing_y > 0.0) {
            return Err(MoireError::InvalidParameter(format!(
                "spacing multipliers must be positive, got {spacing_x}/{spacing_y}"
            )));
        }
        if letter_spacing < 0 {
            return Err(MoireError::InvalidParameter(format!(
                "letter spacing must not be negative, got {letter_spacing}"
            )));
        }

        Ok(Self {
            scale,
            angle_degrees,
            spacing_x,
            spacing_y,
            letter_spacing,
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    pub fn spacing_x(&self) -> f32 {
        self.spacing_x
    }

    pub fn spacing_y(&self) -> f32 {
        self.spacing_y
    }

    pub fn letter_spacing(&self) -> i32 {
        self.letter_spacing
    }
}

/// Capability interface for text rasterization backends.
///
/// Implementations must produce a mask of exactly `width` × `height` where
/// sample value is glyph coverage (0 = background, 255 = full text).
pub trait TextMaskRenderer {
    fn render_mask(
        &self,
        text: &str,
        config: &TextRenderConfig,
        width: u32,
        height: u32,
    ) -> Result<GrayImage>;
}

/// Default [`TextMaskRenderer`] backed by an ab_glyph font.
pub struct GlyphMaskRenderer {
    font: FontVec,
}

impl GlyphMaskRenderer {
    pub fn from_font_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes =
            std::fs::read(path.as_ref()).map_err(|source| MoireError::ReadError { source })?;
        Self::from_font_bytes(bytes)
    }

    pub fn from_font_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(bytes).map_err(|_| MoireError::InvalidFont)?;
        Ok(Self { font })
    }
}

impl TextMaskRenderer for GlyphMaskRenderer {
    fn render_mask(
        &self,
        text: &str,
        config: &TextRenderConfig,
        width: u32,
        height: u32,
    ) -> Result<GrayImage> {
        if text.is_empty() {
            return Ok(GrayImage::from_pixel(width, height, Luma([0])));
        }

        let scale = PxScale::from(config.scale * BASE_GLYPH_PX);

        // per-character offsets within one text instance
        let mut offsets: Vec<(String, i64)> = Vec::new();
        let mut x_pos: i64 = 0;
        let mut text_h: u32 = 1;
        for ch in text.chars() {
            let glyph = ch.to_string();
            let (w, h) = text_size(scale, &self.font, &glyph);
            offsets.push((glyph, x_pos));
            x_pos += i64::from(w) + i64::from(config.letter_spacing);
            text_h = text_h.max(h);
        }
        let text_w = (x_pos - i64::from(config.letter_spacing)).max(1) as u32;

        // bounding box of one rotated text instance
        let angle = config.angle_degrees.to_radians();
        let (sin, cos) = (angle.sin().abs(), angle.cos().abs());
        let rotated_w = ((text_w as f32 * cos + text_h as f32 * sin) as u32).max(1);
        let rotated_h = ((text_w as f32 * sin + text_h as f32 * cos) as u32).max(1);

        // oversized square canvas so the center crop stays covered after rotation
        let diagonal = (width as f32).hypot(height as f32) as u32 + rotated_w.max(rotated_h);
        let step_x = i64::from(((rotated_w as f32 * config.spacing_x) as u32).max(1));
        let step_y = i64::from(((rotated_h as f32 * config.spacing_y) as u32).max(1));

        let mut canvas = GrayImage::from_pixel(diagonal, diagonal, Luma([0]));
        let mut y = -i64::from(rotated_h);
        while y < i64::from(diagonal + rotated_h) {
            let mut x_base = -i64::from(rotated_w);
            while x_base < i64::from(diagonal + rotated_w) {
                for (glyph, offset) in &offsets {
                    draw_text_mut(
                        &mut canvas,
                        Luma([255u8]),
                        (x_base + offset) as i32,
                        y as i32,
                        scale,
                        &self.font,
                        glyph,
                    );
                }
                x_base += step_x;
            }
            y += step_y;
        }

        if config.angle_degrees != 0.0 {
            canvas = rotate_about_center(&canvas, -angle, Interpolation::Nearest, Luma([0]));
        }

        let crop_x = (diagonal - width) / 2;
        let crop_y = (diagonal - height) / 2;
        Ok(imageops::crop_imm(&canvas, crop_x, crop_y, width, height).to_image())
    }
}
