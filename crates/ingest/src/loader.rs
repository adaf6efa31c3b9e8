//! Single-file and directory loads.
//!
//! ## Directory layout
//!
//! ```text
//! data/
//! ├── users.csv        -> users
//! ├── products.csv     -> products
//! ├── orders.csv       -> orders
//! └── order_items.csv  -> order_items
//! ```
//!
//! Files are loaded in that order so referenced rows exist before the rows
//! that reference them. A missing file is skipped with a warning.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::chunk::{ChunkReader, count_data_rows};
use crate::error::LoadError;
use crate::progress::{Progress, with_thousands};
use crate::sink::ChunkSink;

/// Rows per chunk unless overridden.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Source file name to target table, in load order.
pub const DEFAULT_TABLE_FILES: [(&str, &str); 4] = [
    ("users.csv", "users"),
    ("products.csv", "products"),
    ("orders.csv", "orders"),
    ("order_items.csv", "order_items"),
];

/// Options for a load.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Rows read and appended per chunk.
    pub chunk_size: usize,
    /// Count the file's rows before loading so progress has a total.
    pub count_rows: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            count_rows: true,
        }
    }
}

/// Outcome of loading one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub table: String,
    /// Rows appended to the table.
    pub rows: u64,
    pub chunks: u64,
    /// Date cells nulled because they did not parse.
    pub nulled_dates: u64,
}

/// Outcome of loading a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryReport {
    pub loaded: Vec<LoadReport>,
    /// Expected files that were not present.
    pub missing: Vec<String>,
}

impl DirectoryReport {
    #[must_use]
    pub fn total_rows(&self) -> u64 {
        self.loaded.iter().map(|report| report.rows).sum()
    }
}

/// Append every row of a CSV file to `table`.
///
/// Rows are read `options.chunk_size` at a time, normalized, date-coerced and
/// handed to `sink`. Existing rows in the table are left in place; loading the
/// same file twice appends its rows twice.
///
/// # Errors
///
/// Returns `LoadError` for an invalid table name or chunk size, a missing or
/// malformed file, or any sink failure. Unparseable date cells are not errors.
#[instrument(skip(sink, path, options), fields(path = %path.display()))]
pub async fn load_csv_into_table<S: ChunkSink>(
    sink: &mut S,
    path: &Path,
    table: &str,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError> {
    validate_table_name(table)?;

    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    info!("Loading data from {file_name} to {table}...");

    let total = if options.count_rows {
        let total = count_data_rows(path)?;
        info!(total, "Total rows to process: {}", with_thousands(total));
        Some(total)
    } else {
        None
    };

    let reader = ChunkReader::open(path, options.chunk_size)?;

    let mut report = LoadReport {
        table: table.to_owned(),
        rows: 0,
        chunks: 0,
        nulled_dates: 0,
    };
    let mut processed: u64 = 0;

    for chunk in reader {
        let chunk = chunk?;
        report.rows += sink.append(table, &chunk).await?;
        report.chunks += 1;
        report.nulled_dates += chunk.nulled_dates;
        processed += chunk.len() as u64;

        let progress = Progress::new(processed, total);
        info!(
            processed,
            total,
            percent = progress.percent(),
            "Processed {progress}"
        );
    }

    info!(
        rows = report.rows,
        chunks = report.chunks,
        nulled_dates = report.nulled_dates,
        "Successfully loaded data into {table}"
    );
    Ok(report)
}

/// Load every file of `table_files` found in `dir`.
///
/// Missing files are logged and recorded in the report; the remaining files
/// are still loaded.
///
/// # Errors
///
/// Returns `LoadError::MissingDirectory` if `dir` is not a directory, and the
/// first error from [`load_csv_into_table`] otherwise (the run stops there).
#[instrument(skip(sink, dir, table_files, options), fields(dir = %dir.display()))]
pub async fn load_directory<S: ChunkSink>(
    sink: &mut S,
    dir: &Path,
    table_files: &[(&str, &str)],
    options: &LoadOptions,
) -> Result<DirectoryReport, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }

    let mut report = DirectoryReport::default();

    for &(file_name, table) in table_files {
        let path = dir.join(file_name);
        if path.is_file() {
            let loaded = load_csv_into_table(sink, &path, table, options).await?;
            report.loaded.push(loaded);
        } else {
            warn!("{file_name} not found in {}", dir.display());
            report.missing.push(file_name.to_owned());
        }
    }

    info!(
        files = report.loaded.len(),
        missing = report.missing.len(),
        rows = report.total_rows(),
        "Data loading complete"
    );
    Ok(report)
}

/// Names from `table_files` with no matching file in `dir`.
#[must_use]
pub fn missing_files(dir: &Path, table_files: &[(&str, &str)]) -> Vec<String> {
    table_files
        .iter()
        .filter(|(file_name, _)| !dir.join(file_name).is_file())
        .map(|(file_name, _)| (*file_name).to_owned())
        .collect()
}

/// Table names are interpolated into SQL; only plain identifiers are allowed.
fn validate_table_name(table: &str) -> Result<(), LoadError> {
    let mut chars = table.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_lowercase() || first == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(LoadError::InvalidTableName(table.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::chunk::Cell;
    use crate::sink::MemorySink;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn users_csv(rows: usize) -> String {
        let mut csv = String::from("ID,First Name,Last Name,Email,Created At\n");
        for i in 1..=rows {
            csv.push_str(&format!(
                "{i},First{i},Last{i},user{i}@example.com,2024-01-{:02} 09:00:00\n",
                (i % 28) + 1
            ));
        }
        csv
    }

    fn options(chunk_size: usize) -> LoadOptions {
        LoadOptions {
            chunk_size,
            count_rows: true,
        }
    }

    #[tokio::test]
    async fn test_load_yields_all_rows_for_any_chunk_size() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "users.csv", &users_csv(7));

        for chunk_size in [1, 3, 7] {
            let mut sink = MemorySink::default();
            let report = load_csv_into_table(&mut sink, &path, "users", &options(chunk_size))
                .await
                .unwrap();

            assert_eq!(report.rows, 7, "chunk_size {chunk_size}");
            assert_eq!(report.chunks, 7_u64.div_ceil(chunk_size as u64));
            assert_eq!(sink.rows("users").len(), 7);
        }
    }

    #[tokio::test]
    async fn test_load_normalizes_columns_and_keeps_row_order() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "users.csv", &users_csv(4));

        let mut sink = MemorySink::default();
        load_csv_into_table(&mut sink, &path, "users", &options(3))
            .await
            .unwrap();

        assert_eq!(
            sink.columns["users"],
            ["id", "first_name", "last_name", "email", "created_at"]
        );
        let ids: Vec<&Cell> = sink.rows("users").iter().map(|row| &row[0]).collect();
        assert_eq!(
            ids,
            [
                &Cell::Text("1".into()),
                &Cell::Text("2".into()),
                &Cell::Text("3".into()),
                &Cell::Text("4".into())
            ]
        );
        assert!(
            sink.rows("users")
                .iter()
                .all(|row| matches!(row[4], Cell::Timestamp(_)))
        );
    }

    #[tokio::test]
    async fn test_bad_dates_become_null_without_dropping_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "orders.csv",
            "id,user_id,status,created_at,updated_at\n\
             1,1,Shipped,2024-02-01 10:00:00,garbage\n\
             2,1,Complete,31/31/2024,2024-02-03\n\
             3,2,Processing,2024-02-02,2024-02-04 12:00:00\n",
        );

        let mut sink = MemorySink::default();
        let report = load_csv_into_table(&mut sink, &path, "orders", &options(2))
            .await
            .unwrap();

        assert_eq!(report.rows, 3);
        assert_eq!(report.nulled_dates, 2);

        let rows = sink.rows("orders");
        assert!(matches!(rows[0][3], Cell::Timestamp(_)));
        assert!(rows[0][4].is_null());
        assert!(rows[1][3].is_null());
        assert!(matches!(rows[1][4], Cell::Timestamp(_)));
        assert!(matches!(rows[2][3], Cell::Timestamp(_)));
    }

    #[tokio::test]
    async fn test_reloading_appends_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "users.csv", &users_csv(5));

        let mut sink = MemorySink::default();
        load_csv_into_table(&mut sink, &path, "users", &options(2))
            .await
            .unwrap();
        load_csv_into_table(&mut sink, &path, "users", &options(2))
            .await
            .unwrap();

        let rows = sink.rows("users");
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0], rows[5]);
    }

    #[tokio::test]
    async fn test_load_without_row_count() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "users.csv", &users_csv(3));

        let mut sink = MemorySink::default();
        let report = load_csv_into_table(
            &mut sink,
            &path,
            "users",
            &LoadOptions {
                chunk_size: 2,
                count_rows: false,
            },
        )
        .await
        .unwrap();

        assert_eq!(report.rows, 3);
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut sink = MemorySink::default();

        let result = load_csv_into_table(
            &mut sink,
            &dir.path().join("users.csv"),
            "users",
            &LoadOptions::default(),
        )
        .await;

        assert!(matches!(result, Err(LoadError::MissingFile(_))));
    }

    #[tokio::test]
    async fn test_invalid_table_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "users.csv", &users_csv(1));
        let mut sink = MemorySink::default();

        for table in ["", "Users", "users; DROP TABLE orders", "1users"] {
            let result =
                load_csv_into_table(&mut sink, &path, table, &LoadOptions::default()).await;
            assert!(
                matches!(result, Err(LoadError::InvalidTableName(_))),
                "{table:?}"
            );
        }
        assert!(sink.tables.is_empty());
    }

    #[tokio::test]
    async fn test_directory_load_skips_missing_files() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "users.csv", &users_csv(2));
        write_file(
            dir.path(),
            "orders.csv",
            "id,user_id,status,created_at\n1,1,Shipped,2024-01-01\n",
        );

        let mut sink = MemorySink::default();
        let report = load_directory(
            &mut sink,
            dir.path(),
            &DEFAULT_TABLE_FILES,
            &LoadOptions::default(),
        )
        .await
        .unwrap();

        let tables: Vec<&str> = report.loaded.iter().map(|r| r.table.as_str()).collect();
        assert_eq!(tables, ["users", "orders"]);
        assert_eq!(report.missing, ["products.csv", "order_items.csv"]);
        assert_eq!(report.total_rows(), 3);
        assert_eq!(sink.rows("orders").len(), 1);
    }

    #[tokio::test]
    async fn test_directory_must_exist() {
        let mut sink = MemorySink::default();
        let result = load_directory(
            &mut sink,
            Path::new("/definitely/not/a/dir"),
            &DEFAULT_TABLE_FILES,
            &LoadOptions::default(),
        )
        .await;

        assert!(matches!(result, Err(LoadError::MissingDirectory(_))));
    }

    #[test]
    fn test_missing_files() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "products.csv", "id,name,price\n");

        assert_eq!(
            missing_files(dir.path(), &DEFAULT_TABLE_FILES),
            ["users.csv", "orders.csv", "order_items.csv"]
        );
    }
}
