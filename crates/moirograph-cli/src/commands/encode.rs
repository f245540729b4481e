use std::path::PathBuf;

use clap::Args;
use moirograph_core::Waveform;

use crate::CliResult;

/// Hides a text inside an image as a printable stripe interference pattern
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Carrier image in any format the generic loader understands, used readonly.
    #[arg(short = 'i', long = "in", value_name = "input image", required = true)]
    pub input_image: PathBuf,

    /// Encoded PNG will be stored as file (default: <input>-encoded.png)
    #[arg(short = 'o', long = "out", value_name = "output image file")]
    pub output: Option<PathBuf>,

    /// Text to hide in the image
    #[arg(short, long, value_name = "text", default_value = "SECRET")]
    pub text: String,

    /// TrueType/OpenType font file used to rasterize the text
    #[arg(short, long, value_name = "font file", required = true)]
    pub font: PathBuf,

    /// Period of the stripes in pixels
    #[arg(long, value_name = "pixels", default_value_t = 2)]
    pub stripe_period: u32,

    /// Stripe pattern type
    #[arg(long, value_name = "binary|sinusoidal", default_value = "binary")]
    pub stripe_type: Waveform,

    /// Width of each vertical strip
    #[arg(long, value_name = "pixels", default_value_t = 5)]
    pub strip_width: u32,

    /// Height of each chunk
    #[arg(long, value_name = "pixels", default_value_t = 5)]
    pub chunk_height: u32,

    /// Minimum line thickness
    #[arg(long, value_name = "pixels", default_value_t = 1)]
    pub min_thickness: u32,

    /// Maximum line thickness
    #[arg(long, value_name = "pixels", default_value_t = 5)]
    pub max_thickness: u32,

    /// Strength of the hidden pattern
    #[arg(long, value_name = "0..1", default_value_t = 0.3)]
    pub amplitude: f32,

    /// Font size scaling factor
    #[arg(long, value_name = "factor", default_value_t = 1.0)]
    pub font_scale: f32,

    /// Text rotation angle in degrees
    #[arg(long, value_name = "degrees", default_value_t = 45.0)]
    pub text_angle: f32,

    /// Horizontal text spacing multiplier
    #[arg(long, value_name = "factor", default_value_t = 1.4)]
    pub spacing_x: f32,

    /// Vertical text spacing multiplier
    #[arg(long, value_name = "factor", default_value_t = 0.4)]
    pub spacing_y: f32,

    /// Pixel spacing between characters
    #[arg(long, value_name = "pixels", default_value_t = 0)]
    pub letter_spacing: i32,
}

impl EncodeArgs {
    pub fn run(self) -> CliResult {
        let output = self
            .output
            .unwrap_or_else(|| super::derive_output(&self.input_image, "", "-encoded"));

        moirograph_core::api::encode::prepare()
            .with_image(&self.input_image)
            .with_output(&output)
            .with_text(&self.text)
            .with_font(&self.font)
            .with_stripe_period(self.stripe_period)
            .with_waveform(self.stripe_type)
            .with_strip_width(self.strip_width)
            .with_chunk_height(self.chunk_height)
            .with_thickness_range(self.min_thickness, self.max_thickness)
            .with_amplitude(self.amplitude)
            .with_font_scale(self.font_scale)
            .with_text_angle(self.text_angle)
            .with_spacing(self.spacing_x, self.spacing_y)
            .with_letter_spacing(self.letter_spacing)
            .execute()?;

        println!("Encoded image saved to {}", output.display());

        Ok(())
    }
}
