mod analytics;
mod ingest;
mod invariants;
mod models;
mod parse;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use analytics::Statistics;
use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use ingest::collect_entries;
use report::write_report;

#[derive(Parser, Debug)]
#[command(version, about = "Parse eepsite access logs and generate an HTML report", long_about = None)]
struct Args {
    /// Directory to scan for .log files; prompted for when omitted
    directory: Option<PathBuf>,

    /// Where to write the report
    #[arg(long, default_value = "report.html")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Log File Parser and HTML Report Generator");
    println!("==========================================");
    println!(
        "Parses all .log files under a directory and generates an HTML report with visitor statistics.\n"
    );

    let directory = match args.directory {
        Some(dir) => dir,
        None => prompt_for_directory()?,
    };
    if !directory.is_dir() {
        bail!("'{}' is not a valid directory", directory.display());
    }

    println!("Parsing log files in '{}'...", directory.display());
    let outcome = collect_entries(&directory)?;
    println!(
        "Scanned {} file(s): {} entries parsed, {} malformed line(s) skipped.",
        outcome.files_scanned,
        outcome.entries.len(),
        outcome.skipped_lines
    );

    if outcome.entries.is_empty() {
        println!("No valid log data found in the specified directory.");
        return Ok(());
    }

    // Captured once so the monthly window and the report footer agree.
    let now = Local::now().naive_local();
    let stats = Statistics::compute(&outcome.entries, now);
    write_report(&stats, &args.output)?;
    println!("HTML report generated: {}", args.output.display());

    Ok(())
}

fn prompt_for_directory() -> Result<PathBuf> {
    print!("Enter the directory containing log files (leave blank for current directory): ");
    io::stdout().flush().context("flushing prompt")?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("reading directory prompt")?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(PathBuf::from("."))
    } else {
        Ok(PathBuf::from(trimmed))
    }
}
