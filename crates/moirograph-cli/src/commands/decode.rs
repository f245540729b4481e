use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Reveals the text hidden in an encoded PNG
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Encoded PNG that carries the hidden text and its metadata
    #[arg(short = 'i', long = "in", value_name = "encoded image", required = true)]
    pub input_encoded: PathBuf,

    /// Revealed image will be stored as file (default: <input>-decoded.png)
    #[arg(short = 'o', long = "out", value_name = "output image file")]
    pub output: Option<PathBuf>,
}

impl DecodeArgs {
    pub fn run(self) -> CliResult {
        let output = self
            .output
            .unwrap_or_else(|| super::derive_output(&self.input_encoded, "-encoded", "-decoded"));

        moirograph_core::api::decode::prepare()
            .from_encoded_file(&self.input_encoded)
            .into_revealed_file(&output)
            .execute()?;

        println!("Decoded image saved to {}", output.display());

        Ok(())
    }
}
