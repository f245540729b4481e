//! Brightness normalization.
//!
//! The carrier is stretched into a fixed band away from pure black and white
//! before the line field is derived from it, so that every chunk's mean
//! brightness lands inside the thickness mapping's input range. The same
//! linear stretch at full range gives the decoder its contrast boost.

use image::{GrayImage, Luma};

/// Lower bound of the normalized brightness band.
pub const NORMALIZED_MIN: u8 = 15;

/// Upper bound of the normalized brightness band.
pub const NORMALIZED_MAX: u8 = 240;

/// Rescale a raster into the [`NORMALIZED_MIN`]..[`NORMALIZED_MAX`] band.
pub fn normalize_brightness(image: &GrayImage) -> GrayImage {
    stretch_to_band(image, NORMALIZED_MIN, NORMALIZED_MAX)
}

/// Linear min/max stretch: the darkest sample maps to `lo`, the brightest to
/// `hi`, everything between follows `lo + (v - min) * (hi - lo) / (max - min)`
/// rounded to the nearest integer. A flat input maps to the band midpoint.
pub fn stretch_to_band(image: &GrayImage, lo: u8, hi: u8) -> GrayImage {
    if image.width() == 0 || image.height() == 0 {
        return image.clone();
    }

    let (min, max) = min_max(image);
    if min == max {
        let mid = ((u16::from(lo) + u16::from(hi)) / 2) as u8;
        return GrayImage::from_pixel(image.width(), image.height(), Luma([mid]));
    }

    let span = f32::from(hi) - f32::from(lo);
    let range = f32::from(max) - f32::from(min);
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let v = image.get_pixel(x, y)[0];
        let stretched = f32::from(lo) + (f32::from(v) - f32::from(min)) * span / range;
        Luma([stretched.round().clamp(0.0, 255.0) as u8])
    })
}

fn min_max(image: &GrayImage) -> (u8, u8) {
    image
        .pixels()
        .fold((u8::MAX, u8::MIN), |(min, max), p| {
            (min.min(p[0]), max.max(p[0]))
        })
}
