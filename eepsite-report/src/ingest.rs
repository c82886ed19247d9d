use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::models::LogEntry;
use crate::parse::parse_log_line;

/// Result of one directory scan. Entries are in encounter order: files in
/// walk order, lines in file order. `skipped_lines` is the aggregate number
/// of lines the parser rejected; individual rejects are not reported.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub entries: Vec<LogEntry>,
    pub files_scanned: usize,
    pub skipped_lines: u64,
}

/// Walk `root` recursively and parse every `.log` file (extension matched
/// case-insensitively). Each file is opened, consumed line by line, and
/// closed before the next one; unreadable files abort the scan with the
/// offending path in the error.
pub fn collect_entries(root: &Path) -> Result<ScanOutcome> {
    let mut outcome = ScanOutcome::default();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() || !is_log_file(entry.path()) {
            continue;
        }
        consume_file(entry.path(), &mut outcome)
            .with_context(|| format!("reading {}", entry.path().display()))?;
        outcome.files_scanned += 1;
    }
    Ok(outcome)
}

fn is_log_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("log"))
}

fn consume_file(path: &Path, outcome: &mut ScanOutcome) -> Result<()> {
    let file = File::open(path)?;
    for line in BufReader::new(file).lines() {
        let line = line?;
        match parse_log_line(line.trim_end()) {
            Some(entry) => outcome.entries.push(entry),
            None => outcome.skipped_lines += 1,
        }
    }
    Ok(())
}
