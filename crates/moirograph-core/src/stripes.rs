//! Stripe key synthesis.
//!
//! The stripe key is the decoding reference: a vertical stripe pattern fully
//! determined by (width, height, period, waveform). Identical inputs always
//! yield a bit-identical raster, which is what allows the decoder to rebuild
//! the key from the two metadata entries alone.

use std::fmt;
use std::str::FromStr;

use image::{GrayImage, Luma};

use crate::error::MoireError;
use crate::result::Result;

/// Shape of the stripe pattern along the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Square wave: the first half of each period is high, the rest low.
    Binary,
    /// `midpoint + midpoint * sin(2π·x / period)`, quantized per column.
    Sinusoidal,
}

impl Waveform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Waveform::Binary => "binary",
            Waveform::Sinusoidal => "sinusoidal",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Waveform {
    type Err = MoireError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "binary" => Ok(Waveform::Binary),
            "sinusoidal" => Ok(Waveform::Sinusoidal),
            other => Err(MoireError::InvalidParameter(format!(
                "unknown stripe type `{other}`, expected `binary` or `sinusoidal`"
            ))),
        }
    }
}

/// Validated stripe pattern parameters, immutable once constructed.
///
/// Encode and decode must use identical parameters for the reveal to work;
/// they travel inside [`EncodingMetadata`](crate::metadata::EncodingMetadata).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripeParameters {
    period: u32,
    waveform: Waveform,
}

impl StripeParameters {
    pub fn new(period: u32, waveform: Waveform) -> Result<Self> {
        if period < 2 {
            return Err(MoireError::InvalidParameter(format!(
                "stripe period must be at least 2, got {period}"
            )));
        }

        Ok(Self { period, waveform })
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }
}

/// Deterministically synthesize the stripe key raster.
pub fn stripe_key(width: u32, height: u32, params: &StripeParameters) -> GrayImage {
    stripe_key_with_phase(width, height, params, 0)
}

/// The key advanced by half a period, used at encode time to flip the stripe
/// phase under text-covered pixels.
pub(crate) fn shifted_stripe_key(width: u32, height: u32, params: &StripeParameters) -> GrayImage {
    let half = params.period / 2;
    stripe_key_with_phase(width, height, params, params.period - half)
}

fn stripe_key_with_phase(
    width: u32,
    height: u32,
    params: &StripeParameters,
    phase: u32,
) -> GrayImage {
    let column: Vec<u8> = (0..width)
        .map(|x| sample(params.waveform, (x + phase) % params.period, params.period))
        .collect();

    GrayImage::from_fn(width, height, |x, _| Luma([column[x as usize]]))
}

fn sample(waveform: Waveform, x: u32, period: u32) -> u8 {
    match waveform {
        Waveform::Binary => {
            if x < period / 2 {
                255
            } else {
                0
            }
        }
        Waveform::Sinusoidal => {
            let angle = 2.0 * std::f64::consts::PI * f64::from(x) / f64::from(period);
            (255.0 * (1.0 + angle.sin()) / 2.0) as u8
        }
    }
}
