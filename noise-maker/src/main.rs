mod args;
mod generator;
mod writer;

use anyhow::Result;
use args::CliArgs;
use chrono::Local;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use writer::write_log_tree;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating {} log file(s), {} line(s) each, under '{}'",
        args.files(),
        args.lines(),
        args.out_dir().display()
    );

    let now = Local::now().naive_local();
    let files = write_log_tree(
        &mut rng,
        args.out_dir(),
        *args.files(),
        *args.lines(),
        *args.routers(),
        now,
    )?;
    for path in &files {
        println!("  wrote {}", path.display());
    }
    println!("Done. Point eepsite-report at '{}'.", args.out_dir().display());

    Ok(())
}
