//! Chunked CSV reading.
//!
//! [`ChunkReader`] wraps a `csv::Reader` and yields [`Chunk`]s of at most
//! `chunk_size` rows. The header is normalized once when the reader is
//! created; date columns are coerced chunk by chunk.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use crate::columns::{is_date_column, normalize_column_name};
use crate::error::LoadError;
use crate::timestamp::parse_timestamp;

/// One value of a transformed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Empty source field, or a date cell that did not parse.
    Null,
    /// Source text, passed through unchanged.
    Text(String),
    /// Coerced value of a date column.
    Timestamp(DateTime<Utc>),
}

impl Cell {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// A batch of transformed rows, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Normalized column names, one per cell in every row.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Non-empty date cells that failed to parse and were nulled.
    pub nulled_dates: u64,
}

impl Chunk {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads a CSV source in bounded-size chunks.
pub struct ChunkReader<R> {
    reader: csv::Reader<R>,
    columns: Vec<String>,
    date_columns: Vec<usize>,
    chunk_size: usize,
    record: StringRecord,
    exhausted: bool,
}

impl ChunkReader<File> {
    /// Open a CSV file for chunked reading.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::MissingFile` if the path does not exist, and the
    /// same errors as [`ChunkReader::from_reader`] otherwise.
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self, LoadError> {
        let file = open_source(path)?;
        Self::from_reader(file, chunk_size)
    }
}

impl<R: Read> ChunkReader<R> {
    /// Wrap any reader producing CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidChunkSize` for a zero chunk size,
    /// `LoadError::EmptyHeader` if there is no header, `LoadError::DuplicateColumn`
    /// if two header fields normalize to the same name, and `LoadError::Csv` if
    /// the header cannot be read.
    pub fn from_reader(source: R, chunk_size: usize) -> Result<Self, LoadError> {
        if chunk_size == 0 {
            return Err(LoadError::InvalidChunkSize);
        }

        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);

        let header = reader.headers()?;
        if header.is_empty() || header.iter().all(|field| field.trim().is_empty()) {
            return Err(LoadError::EmptyHeader);
        }

        let columns: Vec<String> = header.iter().map(normalize_column_name).collect();

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(LoadError::DuplicateColumn(column.clone()));
            }
        }

        let date_columns = columns
            .iter()
            .enumerate()
            .filter(|(_, name)| is_date_column(name))
            .map(|(index, _)| index)
            .collect();

        Ok(Self {
            reader,
            columns,
            date_columns,
            chunk_size,
            record: StringRecord::new(),
            exhausted: false,
        })
    }

    /// Normalized column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Names of the columns that will be coerced to timestamps.
    pub fn date_columns(&self) -> impl Iterator<Item = &str> {
        self.date_columns
            .iter()
            .filter_map(|&index| self.columns.get(index).map(String::as_str))
    }

    fn read_chunk(&mut self) -> Result<Option<Chunk>, LoadError> {
        if self.exhausted {
            return Ok(None);
        }

        let mut rows = Vec::with_capacity(self.chunk_size);
        while rows.len() < self.chunk_size {
            if !self.reader.read_record(&mut self.record)? {
                self.exhausted = true;
                break;
            }
            rows.push(
                self.record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            Cell::Null
                        } else {
                            Cell::Text(field.to_owned())
                        }
                    })
                    .collect::<Vec<_>>(),
            );
        }

        if rows.is_empty() {
            return Ok(None);
        }

        let nulled_dates = self.coerce_dates(&mut rows);

        Ok(Some(Chunk {
            columns: self.columns.clone(),
            rows,
            nulled_dates,
        }))
    }

    /// Replace date-column text with timestamps, nulling what does not parse.
    fn coerce_dates(&self, rows: &mut [Vec<Cell>]) -> u64 {
        let mut total_failed = 0;

        for &index in &self.date_columns {
            let mut failed: u64 = 0;
            for row in rows.iter_mut() {
                let Some(cell) = row.get_mut(index) else {
                    continue;
                };
                if let Cell::Text(raw) = cell {
                    let parsed = parse_timestamp(raw);
                    *cell = match parsed {
                        Some(ts) => Cell::Timestamp(ts),
                        None => {
                            failed += 1;
                            Cell::Null
                        }
                    };
                }
            }

            if failed > 0 {
                let column = self.columns.get(index).map_or("?", String::as_str);
                warn!(
                    column,
                    failed, "Could not convert {failed} value(s) in column '{column}' to datetime; stored as null"
                );
            }
            total_failed += failed;
        }

        total_failed
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<Chunk, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => None,
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}

/// Count data rows (records after the header) in a CSV file.
///
/// This is a full pass over the file, separate from the chunked read. A quoted
/// field spanning several lines counts once.
///
/// # Errors
///
/// Returns `LoadError::MissingFile` if the path does not exist and
/// `LoadError::Csv` if the file is not well-formed CSV.
pub fn count_data_rows(path: &Path) -> Result<u64, LoadError> {
    let file = open_source(path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let mut record = csv::ByteRecord::new();
    let mut count = 0;
    while reader.read_byte_record(&mut record)? {
        count += 1;
    }
    Ok(count)
}

pub(crate) fn open_source(path: &Path) -> Result<File, LoadError> {
    if !path.is_file() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
