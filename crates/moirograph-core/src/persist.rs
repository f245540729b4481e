//! Loading and saving.
//!
//! Carriers load through the generic image loader (any supported format,
//! converted to luma). Encoded images are always written as 8-bit grayscale
//! PNG because the container must carry the metadata contract in its tEXt
//! chunks; a container that drops text chunks makes the file undecodable.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use image::GrayImage;
use log::error;

use crate::encode::EncodedImage;
use crate::error::MoireError;
use crate::metadata::EncodingMetadata;
use crate::result::Result;

pub trait Persist {
    fn save_as(&self, path: &Path) -> Result<()>;
}

/// Load a carrier image of any supported format as grayscale.
pub fn load_carrier(path: impl AsRef<Path>) -> Result<GrayImage> {
    let image = image::open(path.as_ref()).map_err(|e| {
        error!("Error loading carrier image {:?}: {e}", path.as_ref());
        MoireError::InvalidImageMedia
    })?;

    Ok(image.to_luma8())
}

impl Persist for EncodedImage {
    fn save_as(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| {
            error!("Error creating file {path:?}");
            MoireError::WriteError { source }
        })?;

        self.save_to_writer(BufWriter::new(file))
    }
}

impl EncodedImage {
    /// Write the raster as an 8-bit grayscale PNG with one tEXt chunk per
    /// metadata key.
    pub fn save_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, self.raster.width(), self.raster.height());
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        for (key, value) in self.metadata.to_text_chunks() {
            encoder.add_text_chunk(key, value).map_err(|e| {
                error!("Error embedding metadata chunk: {e}");
                MoireError::ImageEncodingError
            })?;
        }

        let mut writer = encoder.write_header().map_err(|e| {
            error!("Error writing PNG header: {e}");
            MoireError::ImageEncodingError
        })?;
        writer.write_image_data(self.raster.as_raw()).map_err(|e| {
            error!("Error writing PNG image data: {e}");
            MoireError::ImageEncodingError
        })?;

        writer.finish().map_err(|e| {
            error!("Error finalizing PNG stream: {e}");
            MoireError::ImageEncodingError
        })
    }
}

/// Load an encoded PNG: pixels as luma, stripe parameters from its tEXt
/// chunks.
pub fn load_encoded(path: impl AsRef<Path>) -> Result<(GrayImage, EncodingMetadata)> {
    let file = File::open(path.as_ref()).map_err(|source| MoireError::ReadError { source })?;
    read_encoded(BufReader::new(file))
}

pub fn read_encoded<R: Read>(reader: R) -> Result<(GrayImage, EncodingMetadata)> {
    let decoder = png::Decoder::new(reader);
    let mut reader = decoder.read_info().map_err(|e| {
        error!("Error reading PNG info: {e}");
        MoireError::InvalidImageMedia
    })?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|_| MoireError::InvalidImageMedia)?;
    buf.truncate(frame.buffer_size());

    let info = reader.info();
    let metadata = EncodingMetadata::from_text_chunks(
        info.uncompressed_latin1_text
            .iter()
            .map(|chunk| (chunk.keyword.as_str(), chunk.text.as_str())),
    )?;

    let raster = luma_from_png(&buf, frame.width, frame.height, frame.color_type, frame.bit_depth)?;
    Ok((raster, metadata))
}

/// Save a revealed raster as plain PNG, no metadata required.
pub fn save_revealed(path: impl AsRef<Path>, revealed: &GrayImage) -> Result<()> {
    revealed
        .save_with_format(path.as_ref(), image::ImageFormat::Png)
        .map_err(|e| {
            error!("Error saving revealed image: {e}");
            MoireError::ImageEncodingError
        })
}

fn luma_from_png(
    data: &[u8],
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
) -> Result<GrayImage> {
    if depth != png::BitDepth::Eight {
        return Err(MoireError::InvalidImageMedia);
    }

    let luma: Vec<u8> = match color {
        png::ColorType::Grayscale => data.to_vec(),
        png::ColorType::GrayscaleAlpha => data.chunks_exact(2).map(|p| p[0]).collect(),
        png::ColorType::Rgb => data.chunks_exact(3).map(|p| luma_of(p[0], p[1], p[2])).collect(),
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .map(|p| luma_of(p[0], p[1], p[2]))
            .collect(),
        png::ColorType::Indexed => return Err(MoireError::InvalidImageMedia),
    };

    if luma.len() != width as usize * height as usize {
        return Err(MoireError::InvalidImageMedia);
    }

    GrayImage::from_raw(width, height, luma).ok_or(MoireError::InvalidImageMedia)
}

// Rec. 709 luma, the weighting the generic loader applies as well
fn luma_of(r: u8, g: u8, b: u8) -> u8 {
    (0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{KEY_STRIPE_PERIOD, KEY_STRIPE_TYPE};
    use crate::stripes::{StripeParameters, Waveform};
    use crate::test_utils::gradient_image;

    fn sample_encoded() -> EncodedImage {
        EncodedImage {
            raster: gradient_image(16, 16),
            metadata: EncodingMetadata::new(
                StripeParameters::new(4, Waveform::Sinusoidal).unwrap(),
            ),
        }
    }

    fn plain_png_with_chunks(chunks: &[(&str, &str)]) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut encoder = png::Encoder::new(&mut buf, 2, 2);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        for (key, value) in chunks {
            encoder
                .add_text_chunk(key.to_string(), value.to_string())
                .unwrap();
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0, 64, 128, 255]).unwrap();
        writer.finish().unwrap();
        buf
    }

    #[test]
    fn encoded_image_round_trips_in_memory() {
        let encoded = sample_encoded();

        let mut buf = Vec::new();
        encoded.save_to_writer(&mut buf).unwrap();
        let (raster, metadata) = read_encoded(buf.as_slice()).unwrap();

        assert_eq!(raster.as_raw(), encoded.raster.as_raw());
        assert_eq!(metadata, encoded.metadata);
    }

    #[test]
    fn encoded_image_round_trips_through_a_file() {
        let out_dir = tempfile::tempdir().unwrap();
        let target = out_dir.path().join("encoded.png");
        let encoded = sample_encoded();

        encoded.save_as(&target).unwrap();
        let (raster, metadata) = load_encoded(&target).unwrap();

        assert_eq!(raster.as_raw(), encoded.raster.as_raw());
        assert_eq!(metadata, encoded.metadata);
    }

    #[test]
    fn png_without_chunks_is_missing_metadata() {
        let buf = plain_png_with_chunks(&[]);

        assert!(matches!(
            read_encoded(buf.as_slice()),
            Err(MoireError::MissingMetadata(_))
        ));
    }

    #[test]
    fn unparsable_chunk_is_corrupt_metadata() {
        let buf = plain_png_with_chunks(&[
            (KEY_STRIPE_PERIOD, "abc"),
            (KEY_STRIPE_TYPE, "binary"),
        ]);

        assert!(matches!(
            read_encoded(buf.as_slice()),
            Err(MoireError::CorruptMetadata { .. })
        ));
    }

    #[test]
    fn non_png_data_is_invalid_media() {
        assert!(matches!(
            read_encoded(&b"not a png at all"[..]),
            Err(MoireError::InvalidImageMedia)
        ));
    }

    #[test]
    fn missing_carrier_file_is_invalid_media() {
        assert!(matches!(
            load_carrier("no/such/carrier.png"),
            Err(MoireError::InvalidImageMedia)
        ));
    }

    #[test]
    fn rgba_encoded_input_is_read_as_luma() {
        let mut buf = Vec::new();
        let mut encoder = png::Encoder::new(&mut buf, 2, 1);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .add_text_chunk(KEY_STRIPE_PERIOD.to_string(), "2".to_string())
            .unwrap();
        encoder
            .add_text_chunk(KEY_STRIPE_TYPE.to_string(), "binary".to_string())
            .unwrap();
        let mut writer = encoder.write_header().unwrap();
        writer
            .write_image_data(&[255, 255, 255, 255, 0, 0, 0, 255])
            .unwrap();
        writer.finish().unwrap();

        let (raster, _) = read_encoded(buf.as_slice()).unwrap();

        assert_eq!(raster.dimensions(), (2, 1));
        assert_eq!(raster.get_pixel(0, 0)[0], 255);
        assert_eq!(raster.get_pixel(1, 0)[0], 0);
    }
}
