use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoireError {
    /// Represents a configuration value that violates its invariant, for example a stripe period below 2
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Represents a source image with zero area
    #[error("Input image has zero area")]
    EmptyInput,

    /// Represents an encoded image whose auxiliary storage lacks a required metadata entry
    #[error("Missing metadata entry `{0}`")]
    MissingMetadata(&'static str),

    /// Represents a metadata entry that is present but unparsable
    #[error("Corrupt metadata entry `{key}` with value `{value}`")]
    CorruptMetadata { key: &'static str, value: String },

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a font that could not be parsed as TrueType/OpenType
    #[error("Font data is not usable")]
    InvalidFont,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing text to hide")]
    MissingText,

    #[error("API Error: Missing font")]
    MissingFont,
}
