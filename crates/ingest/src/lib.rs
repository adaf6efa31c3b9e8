//! Order Dashboard Ingest - Chunked CSV bulk loader.
//!
//! Copies delimited source files into the relational store without holding a
//! whole file in memory:
//!
//! 1. [`ChunkReader`] reads at most `chunk_size` records at a time.
//! 2. Column names are normalized once from the header ([`normalize_column_name`]).
//! 3. Date-like columns are coerced per chunk ([`parse_timestamp`]); a cell
//!    that does not parse becomes null instead of failing the chunk.
//! 4. Each chunk is appended to the target table through a [`ChunkSink`].
//!
//! Loads are append-only. Running the same file twice appends its rows twice;
//! clear the target table first to reload.
//!
//! # Modules
//!
//! - [`columns`] - Header normalization and date-column detection
//! - [`timestamp`] - Lenient timestamp parsing
//! - [`chunk`] - Chunked CSV reading
//! - [`sink`] - Append targets (`PostgreSQL`, dry run)
//! - [`loader`] - Single-file and directory loads with progress reporting
//! - [`profile`] - Structural summary of a source file

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod chunk;
pub mod columns;
pub mod error;
pub mod loader;
pub mod profile;
pub mod progress;
pub mod sink;
pub mod timestamp;

pub use chunk::{Cell, Chunk, ChunkReader, count_data_rows};
pub use columns::{is_date_column, normalize_column_name};
pub use error::LoadError;
pub use loader::{
    DEFAULT_CHUNK_SIZE, DEFAULT_TABLE_FILES, DirectoryReport, LoadOptions, LoadReport,
    load_csv_into_table, load_directory, missing_files,
};
pub use profile::{ColumnKind, ColumnProfile, CsvProfile, profile_csv};
pub use progress::{Progress, with_thousands};
pub use sink::{ChunkSink, DryRunSink, PgSink};
pub use timestamp::parse_timestamp;
