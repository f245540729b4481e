//! The encode pipeline.
//!
//! One stateless pass: normalize the carrier, derive the line field, flip the
//! stripe phase under the text mask and blend the stripe pattern on top. The
//! result carries its own decoding metadata.

use image::GrayImage;

use crate::error::MoireError;
use crate::lines::{line_field, LineFieldConfig};
use crate::metadata::EncodingMetadata;
use crate::normalize::normalize_brightness;
use crate::result::Result;
use crate::stripes::{shifted_stripe_key, stripe_key, StripeParameters};
use crate::text::{TextMaskRenderer, TextRenderConfig};

/// Strength of the stripe pattern in the composed output, within (0, 1].
///
/// Higher values make the hidden pattern easier to recover and easier to
/// spot; lower values favor the carrier's line field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amplitude(f32);

impl Default for Amplitude {
    fn default() -> Self {
        Self(0.3)
    }
}

impl Amplitude {
    pub fn new(value: f32) -> Result<Self> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(MoireError::InvalidParameter(format!(
                "amplitude must be within (0, 1], got {value}"
            )))
        }
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

/// The composed raster together with the metadata that must be persisted
/// alongside it.
#[derive(Debug)]
pub struct EncodedImage {
    pub raster: GrayImage,
    pub metadata: EncodingMetadata,
}

/// Hide `text` inside `image`.
///
/// The carrier is consumed as brightness only; the output raster is a line
/// rendering of it with the stripe pattern blended on top. Decoding the
/// result needs nothing but the raster and the returned metadata.
pub fn encode(
    image: &GrayImage,
    text: &str,
    renderer: &dyn TextMaskRenderer,
    stripes: &StripeParameters,
    lines: &LineFieldConfig,
    text_config: &TextRenderConfig,
    amplitude: Amplitude,
) -> Result<EncodedImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(MoireError::EmptyInput);
    }

    let adjusted = normalize_brightness(image);
    let key = stripe_key(width, height, stripes);
    let shifted = shifted_stripe_key(width, height, stripes);
    let field = line_field(&adjusted, lines);

    let mask = renderer.render_mask(text, text_config, width, height)?;
    if mask.dimensions() != (width, height) {
        return Err(MoireError::InvalidParameter(format!(
            "text mask is {}x{}, expected {width}x{height}",
            mask.width(),
            mask.height()
        )));
    }

    let a = amplitude.value();
    let mut raster = GrayImage::new(width, height);
    for (x, y, out) in raster.enumerate_pixels_mut() {
        let t = f32::from(mask.get_pixel(x, y)[0]) / 255.0;
        let k = f32::from(key.get_pixel(x, y)[0]);
        let k_shifted = f32::from(shifted.get_pixel(x, y)[0]);
        let stripe = k * (1.0 - t) + k_shifted * t;
        let line = f32::from(field.get_pixel(x, y)[0]);
        out[0] = (line * (1.0 - a) + stripe * a).clamp(0.0, 255.0) as u8;
    }

    Ok(EncodedImage {
        raster,
        metadata: EncodingMetadata::new(*stripes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stripes::Waveform;
    use crate::test_utils::{flat_image, HalfMaskRenderer};

    #[test]
    fn amplitude_must_stay_in_its_interval() {
        assert!(matches!(
            Amplitude::new(0.0),
            Err(MoireError::InvalidParameter(_))
        ));
        assert!(matches!(
            Amplitude::new(1.5),
            Err(MoireError::InvalidParameter(_))
        ));
        assert!(Amplitude::new(1.0).is_ok());
        assert!((Amplitude::default().value() - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_area_image_is_rejected() {
        let stripes = StripeParameters::new(2, Waveform::Binary).unwrap();

        let result = encode(
            &GrayImage::new(0, 0),
            "HI",
            &HalfMaskRenderer,
            &stripes,
            &LineFieldConfig::default(),
            &TextRenderConfig::default(),
            Amplitude::default(),
        );

        assert!(matches!(result, Err(MoireError::EmptyInput)));
    }

    /// 100x100 flat gray carrier, period 4 binary stripes, amplitude 0.3,
    /// text mask covering the left half. All blend values are hand-checked.
    #[test]
    fn flat_gray_scenario_produces_the_expected_blend() {
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

        assert_eq!(encoded.raster.dimensions(), (100, 100));
        assert_eq!(encoded.metadata, EncodingMetadata::new(stripes));

        // masked, no line, shifted key low: fully dark
        assert_eq!(encoded.raster.get_pixel(0, 0)[0], 0);
        // masked, line high, shifted key low: 0.7 * 255
        assert_eq!(encoded.raster.get_pixel(1, 0)[0], 178);
        // unmasked, line high, key high: saturated
        assert_eq!(encoded.raster.get_pixel(52, 0)[0], 255);
        // unmasked, no line, key high: 0.3 * 255
        assert_eq!(encoded.raster.get_pixel(60, 0)[0], 76);
    }

    #[test]
    fn encoding_is_deterministic() {
        let stripes = StripeParameters::new(6, Waveform::Sinusoidal).unwrap();
        let carrier = flat_image(40, 30, 90);

        let once = encode(
            &carrier,
            "HI",
            &HalfMaskRenderer,
            &stripes,
            &LineFieldConfig::default(),
            &TextRenderConfig::default(),
            Amplitude::default(),
        )
        .unwrap();
        let twice = encode(
            &carrier,
            "HI",
            &HalfMaskRenderer,
            &stripes,
            &LineFieldConfig::default(),
            &TextRenderConfig::default(),
            Amplitude::default(),
        )
        .unwrap();

        assert_eq!(once.raster.as_raw(), twice.raster.as_raw());
    }
}
