//! Source directory inspection.
//!
//! # Usage
//!
//! ```bash
//! od-cli inspect --data-dir ./archive --sample-size 5
//! od-cli inspect --json
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use order_dashboard_ingest::{
    CsvProfile, DEFAULT_TABLE_FILES, LoadError, profile_csv, with_thousands,
};

use super::CommandError;

/// Profile every CSV file in `dir` and print the result.
///
/// # Errors
///
/// Returns `CommandError::Load` if the directory is missing or a file cannot
/// be profiled.
#[allow(clippy::print_stdout)]
pub fn run(dir: &Path, sample_size: usize, json: bool) -> Result<(), CommandError> {
    let files = csv_files(dir)?;
    if files.is_empty() {
        tracing::warn!("No CSV files found in {}", dir.display());
    }

    let profiles = files
        .iter()
        .map(|path| profile_csv(path, sample_size))
        .collect::<Result<Vec<_>, _>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
    } else {
        for profile in &profiles {
            print!("{}", render(profile));
        }
        println!("\nAnalysis complete!");
    }
    Ok(())
}

/// CSV files in `dir`: the known source files first in load order, then any
/// others by name.
fn csv_files(dir: &Path) -> Result<Vec<PathBuf>, CommandError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()).into());
    }

    let io_error = |source| CommandError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut others = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let is_known = path.file_name().is_some_and(|name| {
            DEFAULT_TABLE_FILES
                .iter()
                .any(|(file_name, _)| name == *file_name)
        });
        if path.is_file() && is_csv && !is_known {
            others.push(path);
        }
    }
    others.sort();

    let mut files: Vec<PathBuf> = DEFAULT_TABLE_FILES
        .iter()
        .map(|(file_name, _)| dir.join(file_name))
        .filter(|path| path.is_file())
        .collect();
    files.extend(others);
    Ok(files)
}

/// Human-readable report for one file.
fn render(profile: &CsvProfile) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\nAnalyzing {}...", profile.file_name);
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out, "File size: {:.2} MB", profile.size_mib());

    let _ = writeln!(out, "\nColumns:");
    for (i, column) in profile.columns.iter().enumerate() {
        let _ = write!(
            out,
            "  {}. {} -> {} ({})",
            i + 1,
            column.raw,
            column.normalized,
            column.kind.as_str()
        );
        if column.is_date {
            let _ = write!(out, " [date]");
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "\nSample data:");
    for row in &profile.sample {
        let _ = writeln!(out, "  {}", row.join(" | "));
    }

    match profile.row_count {
        Some(count) => {
            let _ = writeln!(out, "\nTotal rows: {}", with_thousands(count));
        }
        None => {
            let _ = writeln!(out, "\nSkipping row count for large file...");
        }
    }
    out
}
