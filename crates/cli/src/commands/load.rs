//! Bulk load commands.
//!
//! # Usage
//!
//! ```bash
//! # Load users, products, orders and order_items from a directory
//! od-cli load dir --data-dir ./archive
//!
//! # Fail before loading anything if one of the four files is absent
//! od-cli load dir --require-all
//!
//! # Load a single file into a table
//! od-cli load file ./archive/orders.csv --table orders
//!
//! # Validate a directory end to end without writing
//! od-cli load dir --dry-run
//! ```
//!
//! Loads append. Loading the same file twice duplicates its rows.

use std::path::Path;

use order_dashboard_ingest::{
    ChunkSink, DEFAULT_TABLE_FILES, DirectoryReport, LoadError, LoadOptions, LoadReport,
    load_csv_into_table, load_directory, missing_files, with_thousands,
};

use super::CommandError;

/// Load every known source file found in `dir`, in dependency order.
///
/// # Errors
///
/// Returns `CommandError::Load` if the directory is missing or a load fails,
/// and `CommandError::MissingFiles` if `require_all` is set and any known
/// file is absent (checked before anything is loaded).
pub async fn directory<S: ChunkSink>(
    sink: &mut S,
    dir: &Path,
    options: &LoadOptions,
    require_all: bool,
) -> Result<DirectoryReport, CommandError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()).into());
    }
    if require_all {
        check_required_files(dir)?;
    }

    let report = load_directory(sink, dir, &DEFAULT_TABLE_FILES, options).await?;

    for loaded in &report.loaded {
        tracing::info!(
            "{}: {} rows in {} chunks ({} unparseable dates nulled)",
            loaded.table,
            with_thousands(loaded.rows),
            loaded.chunks,
            loaded.nulled_dates
        );
    }
    for file in &report.missing {
        tracing::warn!("Skipped missing file {file}");
    }
    tracing::info!("Loaded {} rows in total", with_thousands(report.total_rows()));

    Ok(report)
}

/// Load one file into `table`.
///
/// # Errors
///
/// Returns `CommandError::Load` if the file is missing, malformed, or cannot
/// be appended.
pub async fn file<S: ChunkSink>(
    sink: &mut S,
    path: &Path,
    table: &str,
    options: &LoadOptions,
) -> Result<LoadReport, CommandError> {
    Ok(load_csv_into_table(sink, path, table, options).await?)
}

/// Fail if any of the known source files is absent from `dir`.
fn check_required_files(dir: &Path) -> Result<(), CommandError> {
    let missing = missing_files(dir, &DEFAULT_TABLE_FILES);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CommandError::MissingFiles {
            dir: dir.display().to_string(),
            files: missing,
        })
    }
}
