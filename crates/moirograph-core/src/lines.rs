//! Line field synthesis.
//!
//! The carrier survives in the output only as a field of vertical lines: each
//! strip of the image is drawn as one centered line whose thickness varies
//! chunk by chunk with the local mean brightness. Brighter chunk, thicker
//! line.

use image::{GrayImage, Luma};

use crate::error::MoireError;
use crate::normalize::{NORMALIZED_MAX, NORMALIZED_MIN};
use crate::result::Result;

/// Background intensity of the line field.
const BACKGROUND: u8 = 0;

/// Intensity of the rendered lines.
const LINE: u8 = 255;

/// Governs how local brightness maps to rendered line thickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFieldConfig {
    strip_width: u32,
    chunk_height: u32,
    min_thickness: u32,
    max_thickness: u32,
}

impl Default for LineFieldConfig {
    fn default() -> Self {
        Self {
            strip_width: 5,
            chunk_height: 5,
            min_thickness: 1,
            max_thickness: 5,
        }
    }
}

impl LineFieldConfig {
    pub fn new(
        strip_width: u32,
        chunk_height: u32,
        min_thickness: u32,
        max_thickness: u32,
    ) -> Result<Self> {
        if strip_width == 0 {
            return Err(MoireError::InvalidParameter(
                "strip width must be positive".into(),
            ));
        }
        if chunk_height == 0 {
            return Err(MoireError::InvalidParameter(
                "chunk height must be positive".into(),
            ));
        }
        if min_thickness == 0 {
            return Err(MoireError::InvalidParameter(
                "minimum line thickness must be positive".into(),
            ));
        }
        if min_thickness > max_thickness {
            return Err(MoireError::InvalidParameter(format!(
                "minimum line thickness {min_thickness} exceeds maximum {max_thickness}"
            )));
        }

        Ok(Self {
            strip_width,
            chunk_height,
            min_thickness,
            max_thickness,
        })
    }

    pub fn strip_width(&self) -> u32 {
        self.strip_width
    }

    pub fn chunk_height(&self) -> u32 {
        self.chunk_height
    }

    pub fn min_thickness(&self) -> u32 {
        self.min_thickness
    }

    pub fn max_thickness(&self) -> u32 {
        self.max_thickness
    }
}

/// Render the vertical-line raster for a brightness-normalized carrier.
///
/// Partial strips and chunks at the right/bottom edge are rendered with their
/// available extent.
pub fn line_field(normalized: &GrayImage, config: &LineFieldConfig) -> GrayImage {
    let (width, height) = normalized.dimensions();
    let mut field = GrayImage::from_pixel(width, height, Luma([BACKGROUND]));

    for strip_x in (0..width).step_by(config.strip_width as usize) {
        let strip_w = config.strip_width.min(width - strip_x);
        for chunk_y in (0..height).step_by(config.chunk_height as usize) {
            let chunk_h = config.chunk_height.min(height - chunk_y);
            let mean = region_mean(normalized, strip_x, chunk_y, strip_w, chunk_h);
            let thickness = thickness_for(mean, config);

            // line centered within the nominal strip width, clipped at the edge
            let start = strip_x + (config.strip_width.saturating_sub(thickness)) / 2;
            let end = (start + thickness).min(width);
            for x in start..end {
                for y in chunk_y..chunk_y + chunk_h {
                    field.put_pixel(x, y, Luma([LINE]));
                }
            }
        }
    }

    field
}

fn region_mean(image: &GrayImage, x0: u32, y0: u32, w: u32, h: u32) -> f32 {
    let mut sum: u64 = 0;
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            sum += u64::from(image.get_pixel(x, y)[0]);
        }
    }

    sum as f32 / (w * h) as f32
}

/// Linear map from the normalized brightness band to the thickness range,
/// truncating, clamped to [min_thickness, max_thickness].
fn thickness_for(mean_brightness: f32, config: &LineFieldConfig) -> u32 {
    let span = (config.max_thickness - config.min_thickness) as f32;
    let band = f32::from(NORMALIZED_MAX) - f32::from(NORMALIZED_MIN);
    let thickness =
        config.min_thickness as f32 + (mean_brightness - f32::from(NORMALIZED_MIN)) * span / band;

    thickness.clamp(config.min_thickness as f32, config.max_thickness as f32) as u32
}
