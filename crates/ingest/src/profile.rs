//! Structural summary of a source file, for checking a data drop before
//! loading it.

use std::path::Path;

use csv::ReaderBuilder;
use serde::Serialize;

use crate::chunk::{count_data_rows, open_source};
use crate::columns::{is_date_column, normalize_column_name};
use crate::error::LoadError;
use crate::timestamp::parse_timestamp;

/// Files at or above this size are not row-counted.
pub const ROW_COUNT_SIZE_LIMIT: u64 = 100 * 1024 * 1024;

/// Value shape inferred from the sample rows of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Float,
    Timestamp,
    Text,
    /// Every sampled value was empty.
    Empty,
}

impl ColumnKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Timestamp => "timestamp",
            Self::Text => "text",
            Self::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    /// Header field as written in the file.
    pub raw: String,
    /// Name the loader will use.
    pub normalized: String,
    /// Whether the loader will coerce this column to timestamps.
    pub is_date: bool,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvProfile {
    pub file_name: String,
    pub size_bytes: u64,
    pub columns: Vec<ColumnProfile>,
    pub sample: Vec<Vec<String>>,
    /// `None` when the file is too large to count cheaply.
    pub row_count: Option<u64>,
}

impl CsvProfile {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size_mib(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Summarize a CSV file: columns, the first `sample_size` rows, and a row count.
///
/// # Errors
///
/// Returns `LoadError::MissingFile` if the file does not exist, `LoadError::Io`
/// if its metadata cannot be read, and `LoadError::Csv` if it is malformed.
pub fn profile_csv(path: &Path, sample_size: usize) -> Result<CsvProfile, LoadError> {
    let file = open_source(path)?;
    let size_bytes = file
        .metadata()
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let header: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();

    let mut sample = Vec::with_capacity(sample_size);
    for record in reader.records().take(sample_size) {
        sample.push(record?.iter().map(str::to_owned).collect::<Vec<_>>());
    }

    let columns = header
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let normalized = normalize_column_name(raw);
            ColumnProfile {
                raw: raw.clone(),
                is_date: is_date_column(&normalized),
                normalized,
                kind: infer_kind(sample.iter().filter_map(|row| row.get(index))),
            }
        })
        .collect();

    let row_count = if size_bytes < ROW_COUNT_SIZE_LIMIT {
        Some(count_data_rows(path)?)
    } else {
        None
    };

    Ok(CsvProfile {
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        size_bytes,
        columns,
        sample,
        row_count,
    })
}

/// Narrowest kind every non-empty value fits.
fn infer_kind<'a>(values: impl Iterator<Item = &'a String>) -> ColumnKind {
    let values: Vec<&str> = values
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();

    if values.is_empty() {
        ColumnKind::Empty
    } else if values.iter().all(|v| v.parse::<i64>().is_ok()) {
        ColumnKind::Integer
    } else if values.iter().all(|v| v.parse::<f64>().is_ok()) {
        ColumnKind::Float
    } else if values.iter().all(|v| parse_timestamp(v).is_some()) {
        ColumnKind::Timestamp
    } else {
        ColumnKind::Text
    }
}
