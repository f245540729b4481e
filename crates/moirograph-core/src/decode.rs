//! The reveal pipeline.
//!
//! The decoder rebuilds the stripe key from the persisted metadata and the
//! encoded raster's own dimensions, takes the per-pixel absolute difference
//! and stretches it to full contrast. Where the encoder flipped the stripe
//! phase under text, the difference is large; elsewhere it stays low.

use image::GrayImage;

use crate::error::MoireError;
use crate::metadata::EncodingMetadata;
use crate::normalize::stretch_to_band;
use crate::result::Result;
use crate::stripes::stripe_key;

/// Reveal the pattern hidden in an encoded raster.
pub fn decode(encoded: &GrayImage, metadata: &EncodingMetadata) -> Result<GrayImage> {
    let (width, height) = encoded.dimensions();
    if width == 0 || height == 0 {
        return Err(MoireError::EmptyInput);
    }

    let key = stripe_key(width, height, metadata.stripe_parameters());

    let mut revealed = GrayImage::new(width, height);
    for (x, y, out) in revealed.enumerate_pixels_mut() {
        out[0] = encoded.get_pixel(x, y)[0].abs_diff(key.get_pixel(x, y)[0]);
    }

    Ok(stretch_to_band(&revealed, 0, 255))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode, Amplitude};
    use crate::lines::LineFieldConfig;
    use crate::stripes::{StripeParameters, Waveform};
    use crate::test_utils::{flat_image, HalfMaskRenderer};
    use crate::text::TextRenderConfig;

    #[test]
    fn zero_area_raster_is_rejected() {
        let metadata =
            EncodingMetadata::new(StripeParameters::new(2, Waveform::Binary).unwrap());

        assert!(matches!(
            decode(&GrayImage::new(0, 0), &metadata),
            Err(MoireError::EmptyInput)
        ));
    }

    #[test]
    fn revealed_raster_separates_text_from_background() {
        let stripes = StripeParameters::new(4, Waveform::Binary).unwrap();
        let encoded = encode(
            &flat_image(100, 100, 128),
            "HI",
            &HalfMaskRenderer,
            &stripes,
            &LineFieldConfig::default(),
            &TextRenderConfig::default(),
            Amplitude::default(),
        )
        .unwrap();

        let revealed = decode(&encoded.raster, &encoded.metadata).unwrap();

        assert_eq!(revealed.dimensions(), (100, 100));

        let mut high_in_text = 0usize;
        for (x, _, p) in revealed.enumerate_pixels() {
            if x < 50 {
                high_in_text += usize::from(p[0] > 200);
            } else {
                // outside the mask the difference never exceeds the stripe swing
                assert!(p[0] <= 200, "background pixel at x={x} decoded to {}", p[0]);
            }
        }

        // a substantial share of the text-covered half decodes to full contrast
        assert!(high_in_text > 1000, "only {high_in_text} high pixels");
    }

    #[test]
    fn reveal_is_deterministic() {
        let stripes = StripeParameters::new(3, Waveform::Sinusoidal).unwrap();
        let encoded = encode(
            &flat_image(32, 32, 64),
            "HI",
            &HalfMaskRenderer,
            &stripes,
            &LineFieldConfig::default(),
            &TextRenderConfig::default(),
            Amplitude::new(0.5).unwrap(),
        )
        .unwrap();

        let first = decode(&encoded.raster, &encoded.metadata).unwrap();
        let second = decode(&encoded.raster, &encoded.metadata).unwrap();

        assert_eq!(first.as_raw(), second.as_raw());
    }
}
