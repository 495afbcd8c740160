use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::models::{ConvertOptions, DEFAULT_INPUT, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(
    name = "habcat",
    author,
    version,
    about = "Reduce a 15-column star catalog to Hipparcos id, RA/Dec in degrees and distance in light-years",
    long_about = None
)]
pub struct Args {
    #[arg(
        short = 'i',
        long = "input",
        value_name = "inFileName",
        default_value = DEFAULT_INPUT,
        help = "Catalog to read; the first line is a header and is skipped"
    )]
    pub input: PathBuf,
    #[arg(
        short = 'o',
        long = "output",
        value_name = "outFileName",
        default_value = DEFAULT_OUTPUT,
        help = "Reduced catalog to write (created or truncated)"
    )]
    pub output: PathBuf,
}

impl Args {
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            input: self.input.clone(),
            output: self.output.clone(),
        }
    }
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
