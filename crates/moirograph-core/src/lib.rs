//! # Moirograph Core API
//!
//! Hides a short text inside a grayscale image by re-rendering the image as
//! a field of vertical lines and blending a deterministic stripe pattern on
//! top. Under text-covered pixels the stripe phase is flipped by half a
//! period, so taking the per-pixel absolute difference against the
//! regenerated stripe key reveals the text again. The stripe parameters
//! travel inside the output PNG's tEXt chunks — decoding needs nothing but
//! the file.
//!
//! The two entry points exposed via [`api`] are
//! - [`api::encode`] for hiding a text inside an image
//! - [`api::decode`] for revealing it again
//!
//! # Usage Examples
//!
//! ## Hide a text inside an image
//!
//! ```no_run
//! moirograph_core::api::encode::prepare()
//!     .with_image("images/sample.jpg")
//!     .with_text("TOP SECRET")
//!     .with_font("fonts/DejaVuSans.ttf")
//!     .with_stripe_period(4)
//!     .with_output("outputs/sample-encoded.png")
//!     .execute()
//!     .expect("Failed to encode image");
//! ```
//!
//! ## Reveal the text from an encoded image
//!
//! ```no_run
//! moirograph_core::api::decode::prepare()
//!     .from_encoded_file("outputs/sample-encoded.png")
//!     .into_revealed_file("outputs/sample-decoded.png")
//!     .execute()
//!     .expect("Failed to decode image");
//! ```
//!
//! Lossless persistence is part of the contract: any container that drops
//! the text chunks (or re-encodes the pixels lossily) makes the file
//! undecodable.

pub mod api;
pub mod decode;
pub mod encode;
pub mod error;
pub mod lines;
pub mod metadata;
pub mod normalize;
pub mod persist;
pub mod result;
pub mod stripes;
pub mod text;

pub use crate::decode::decode;
pub use crate::encode::{encode, Amplitude, EncodedImage};
pub use crate::error::MoireError;
pub use crate::lines::LineFieldConfig;
pub use crate::metadata::EncodingMetadata;
pub use crate::persist::{load_carrier, load_encoded, save_revealed, Persist};
pub use crate::result::Result;
pub use crate::stripes::{stripe_key, StripeParameters, Waveform};
pub use crate::text::{GlyphMaskRenderer, TextMaskRenderer, TextRenderConfig};
