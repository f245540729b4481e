use std::path::{Path, PathBuf};

use crate::encode::{encode, Amplitude};
use crate::error::MoireError;
use crate::lines::LineFieldConfig;
use crate::persist::{load_carrier, Persist};
use crate::result::Result;
use crate::stripes::{StripeParameters, Waveform};
use crate::text::{GlyphMaskRenderer, TextRenderConfig};

pub fn prepare() -> EncodeApi {
    EncodeApi::default()
}

/// Builder for the whole encode pipeline: load a carrier, hide a text,
/// persist the result with its metadata.
#[derive(Debug)]
pub struct EncodeApi {
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    text: Option<String>,
    font: Option<PathBuf>,
    stripe_period: u32,
    waveform: Waveform,
    strip_width: u32,
    chunk_height: u32,
    min_thickness: u32,
    max_thickness: u32,
    amplitude: f32,
    font_scale: f32,
    text_angle: f32,
    spacing_x: f32,
    spacing_y: f32,
    letter_spacing: i32,
}

impl Default for EncodeApi {
    fn default() -> Self {
        Self {
            image: None,
            output: None,
            text: None,
            font: None,
            stripe_period: 2,
            waveform: Waveform::Binary,
            strip_width: 5,
            chunk_height: 5,
            min_thickness: 1,
            max_thickness: 5,
            amplitude: 0.3,
            font_scale: 1.0,
            text_angle: 45.0,
            spacing_x: 1.4,
            spacing_y: 0.4,
            letter_spacing: 0,
        }
    }
}

impl EncodeApi {
    /// The carrier image, used readonly.
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// Where the encoded PNG will be written.
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// The text that will be hidden.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// TrueType/OpenType font file used to rasterize the text.
    pub fn with_font<A: AsRef<Path>>(mut self, font: A) -> Self {
        self.font = Some(font.as_ref().to_path_buf());
        self
    }

    pub fn with_stripe_period(mut self, period: u32) -> Self {
        self.stripe_period = period;
        self
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn with_strip_width(mut self, strip_width: u32) -> Self {
        self.strip_width = strip_width;
        self
    }

    pub fn with_chunk_height(mut self, chunk_height: u32) -> Self {
        self.chunk_height = chunk_height;
        self
    }

    pub fn with_thickness_range(mut self, min: u32, max: u32) -> Self {
        self.min_thickness = min;
        self.max_thickness = max;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_font_scale(mut self, scale: f32) -> Self {
        self.font_scale = scale;
        self
    }

    /// Text rotation angle in degrees, counter-clockwise.
    pub fn with_text_angle(mut self, degrees: f32) -> Self {
        self.text_angle = degrees;
        self
    }

    pub fn with_spacing(mut self, spacing_x: f32, spacing_y: f32) -> Self {
        self.spacing_x = spacing_x;
        self.spacing_y = spacing_y;
        self
    }

    pub fn with_letter_spacing(mut self, letter_spacing: i32) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    /// Execute the encode pipeline and block until the output is written.
    ///
    /// Nothing is written when any parameter violates its invariant.
    pub fn execute(self) -> Result<()> {
        let Some(image) = self.image else {
            return Err(MoireError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(MoireError::TargetNotSet);
        };
        let Some(text) = self.text else {
            return Err(MoireError::MissingText);
        };
        let Some(font) = self.font else {
            return Err(MoireError::MissingFont);
        };

        let stripes = StripeParameters::new(self.stripe_period, self.waveform)?;
        let lines = LineFieldConfig::new(
            self.strip_width,
            self.chunk_height,
            self.min_thickness,
            self.max_thickness,
        )?;
        let text_config = TextRenderConfig::new(
            self.font_scale,
            self.text_angle,
            self.spacing_x,
            self.spacing_y,
            self.letter_spacing,
        )?;
        let amplitude = Amplitude::new(self.amplitude)?;

        let carrier = load_carrier(&image)?;
        let renderer = GlyphMaskRenderer::from_font_file(&font)?;
        let encoded = encode(
            &carrier,
            &text,
            &renderer,
            &stripes,
            &lines,
            &text_config,
            amplitude,
        )?;

        encoded.save_as(&output)
    }
}
