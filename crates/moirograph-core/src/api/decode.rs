use std::path::{Path, PathBuf};

use crate::decode::decode;
use crate::error::MoireError;
use crate::persist::{load_encoded, save_revealed};
use crate::result::Result;

pub fn prepare() -> DecodeApi {
    DecodeApi::default()
}

/// Builder for the whole reveal pipeline: read an encoded PNG and its
/// metadata, reveal the hidden pattern, write the result.
#[derive(Default, Debug)]
pub struct DecodeApi {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl DecodeApi {
    /// The encoded PNG that carries the hidden text and its metadata.
    pub fn from_encoded_file(mut self, input: impl AsRef<Path>) -> Self {
        self.input = Some(input.as_ref().to_path_buf());
        self
    }

    /// Where the revealed image will be written.
    pub fn into_revealed_file(mut self, output: impl AsRef<Path>) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Execute the reveal and block until the output is written.
    pub fn execute(self) -> Result<()> {
        let Some(input) = self.input else {
            return Err(MoireError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(MoireError::TargetNotSet);
        };

        let (raster, metadata) = load_encoded(&input)?;
        let revealed = decode(&raster, &metadata)?;

        save_revealed(&output, &revealed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_inputs_fail_fast() {
        assert!(matches!(
            prepare().execute(),
            Err(MoireError::CarrierNotSet)
        ));
        assert!(matches!(
            prepare().from_encoded_file("encoded.png").execute(),
            Err(MoireError::TargetNotSet)
        ));
    }
}
