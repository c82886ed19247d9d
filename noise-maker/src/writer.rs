use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use rand::{Rng, seq::IndexedRandom};

use crate::generator::{generate_access_line, random_router_hash};

/// Matches the analyzer's monthly-rollup window so a fresh tree produces a
/// populated report.
const WINDOW_DAYS: i64 = 56 * 30;

/// Roughly one line in fifty is junk, to exercise the analyzer's
/// malformed-line skip path.
const MALFORMED_ONE_IN: u32 = 50;

pub fn write_log_tree<R: Rng + ?Sized>(
    rng: &mut R,
    out_dir: &Path,
    files: usize,
    lines_per_file: u64,
    router_pool: usize,
    now: NaiveDateTime,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let routers: Vec<String> = (0..router_pool.max(1))
        .map(|_| random_router_hash(rng))
        .collect();
    let window = Duration::days(WINDOW_DAYS);
    let mean_step = (window.num_seconds() / lines_per_file.max(1) as i64).max(1);

    let mut written = Vec::with_capacity(files);
    for index in 0..files {
        let path = out_dir.join(format!("access-{index}.log"));
        let file =
            File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let mut out = BufWriter::new(file);

        // Each file walks the window chronologically, like a real log.
        let mut stamp = now - window + Duration::seconds(rng.random_range(0..3600));
        for _ in 0..lines_per_file {
            if rng.random_ratio(1, MALFORMED_ONE_IN) {
                writeln!(out, "-- log writer restarted --")?;
            } else {
                let router = routers.choose(rng).unwrap();
                writeln!(out, "{}", generate_access_line(rng, router, stamp))?;
            }
            stamp += Duration::seconds(rng.random_range(1..=mean_step * 2));
        }
        out.flush()?;
        written.push(path);
    }
    Ok(written)
}
