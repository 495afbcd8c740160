#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
pub fn run() -> Result<(), crate::error::AppError> {
    use crate::adapters::cli::{Args, init_logging};
    use crate::catalog::convert_file;

    let args = Args::parse();
    init_logging();

    convert_file(&args.to_options())?;

    Ok(())
}
