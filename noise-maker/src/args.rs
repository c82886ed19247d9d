use std::path::PathBuf;

use clap::Parser;
use derive_getters::Getters;

#[derive(Parser, Debug, Getters)]
#[command(name = "noise-maker")]
#[command(about = "Generate synthetic eepsite access logs for testing", long_about = None)]
pub struct CliArgs {
    /// Directory the .log files are written into
    #[arg(long, default_value = "logs")]
    out_dir: PathBuf,

    #[arg(long, default_value_t = 3)]
    files: usize,

    #[arg(long, default_value_t = 1000)]
    lines: u64,

    /// Number of distinct router hashes to draw visitors from
    #[arg(long, default_value_t = 25)]
    routers: usize,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}
