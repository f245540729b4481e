use clap::Parser;
use log::debug;

mod cli;
mod commands;

use crate::cli::{CliArgs, Commands};

pub(crate) type CliResult<T = ()> = std::result::Result<T, moirograph_core::MoireError>;

fn main() -> CliResult {
    env_logger::init();

    let args = CliArgs::parse();
    debug!("{args:?}");

    match args.command {
        Commands::Encode(cmd) => cmd.run(),
        Commands::Decode(cmd) => cmd.run(),
    }
}
