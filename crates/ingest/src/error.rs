//! Loader error type.
//!
//! Everything here aborts the run. Unparseable date cells are not errors:
//! they are nulled and reported as warnings by the chunk reader.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source file does not exist.
    #[error("source file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Data directory does not exist or is not a directory.
    #[error("data directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// Source file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file is not well-formed CSV (bad quoting, ragged rows, invalid UTF-8).
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Database operation failed (connection, constraint, type cast).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Chunk size of zero.
    #[error("chunk size must be at least 1")]
    InvalidChunkSize,

    /// Target table name is not a plain lower-case identifier.
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),

    /// Target table does not exist in the current schema.
    #[error("table {0} does not exist")]
    UnknownTable(String),

    /// Source column has no counterpart in the target table.
    #[error("table {table} has no column {column}")]
    UnknownColumn { table: String, column: String },

    /// Two header fields normalize to the same name.
    #[error("duplicate column {0:?} after normalizing the header")]
    DuplicateColumn(String),

    /// Header row is missing or has no fields.
    #[error("CSV header is empty")]
    EmptyHeader,
}
