//! Append targets for transformed chunks.
//!
//! [`PgSink`] writes into `PostgreSQL`; [`DryRunSink`] only counts rows so a
//! source directory can be validated end to end without touching the database.

use std::collections::HashMap;
use std::future::Future;

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::chunk::{Cell, Chunk};
use crate::error::LoadError;

/// Largest number of rows in one `INSERT` statement.
const MAX_ROWS_PER_STATEMENT: usize = 1000;

/// `PostgreSQL` limit on bind parameters per statement.
const MAX_BIND_PARAMS: usize = 65_535;

/// Destination for transformed chunks.
///
/// `append` adds every row of the chunk to `table` after any rows already
/// there, in chunk order, and returns the number of rows appended. It never
/// deletes or replaces existing rows.
pub trait ChunkSink {
    fn append(
        &mut self,
        table: &str,
        chunk: &Chunk,
    ) -> impl Future<Output = Result<u64, LoadError>> + Send;
}

/// Appends chunks to `PostgreSQL` tables.
///
/// Each chunk is written inside one transaction, so a failing chunk leaves no
/// partial rows behind (earlier chunks stay committed). Text cells are cast to
/// the base type of their target column, without its modifier, so length and
/// precision limits are checked on assignment: an over-length value fails the
/// chunk instead of being truncated.
pub struct PgSink {
    pool: PgPool,
    column_types: HashMap<String, HashMap<String, String>>,
}

impl PgSink {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            column_types: HashMap::new(),
        }
    }

    /// Look up (and cache) the column base types of `table` (`character varying`,
    /// not `character varying(100)`).
    async fn column_types(&mut self, table: &str) -> Result<&HashMap<String, String>, LoadError> {
        if !self.column_types.contains_key(table) {
            let rows: Vec<(String, String)> = sqlx::query_as(
                r"
                SELECT a.attname::text, format_type(a.atttypid, NULL)
                FROM pg_attribute a
                WHERE a.attrelid = to_regclass($1)
                  AND a.attnum > 0
                  AND NOT a.attisdropped
                ",
            )
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

            if rows.is_empty() {
                return Err(LoadError::UnknownTable(table.to_owned()));
            }

            debug!(table, columns = rows.len(), "Loaded target column types");
            self.column_types
                .insert(table.to_owned(), rows.into_iter().collect());
        }

        self.column_types
            .get(table)
            .ok_or_else(|| LoadError::UnknownTable(table.to_owned()))
    }
}

impl ChunkSink for PgSink {
    async fn append(&mut self, table: &str, chunk: &Chunk) -> Result<u64, LoadError> {
        if chunk.is_empty() {
            return Ok(0);
        }

        let known = self.column_types(table).await?;
        let types = chunk
            .columns
            .iter()
            .map(|column| {
                known
                    .get(column)
                    .cloned()
                    .ok_or_else(|| LoadError::UnknownColumn {
                        table: table.to_owned(),
                        column: column.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let column_list = chunk
            .columns
            .iter()
            .map(|column| quote_ident(column))
            .collect::<Vec<_>>()
            .join(", ");
        let rows_per_statement =
            (MAX_BIND_PARAMS / chunk.columns.len().max(1)).clamp(1, MAX_ROWS_PER_STATEMENT);

        let mut tx = self.pool.begin().await?;
        let mut appended = 0;

        for rows in chunk.rows.chunks(rows_per_statement) {
            let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
                "INSERT INTO {} ({column_list}) ",
                quote_ident(table)
            ));

            builder.push_values(rows, |mut values, row| {
                for (cell, ty) in row.iter().zip(&types) {
                    values.push("CAST(");
                    match cell {
                        Cell::Null => values.push_bind_unseparated(None::<String>),
                        Cell::Text(text) => values.push_bind_unseparated(text.clone()),
                        Cell::Timestamp(ts) => values.push_bind_unseparated(*ts),
                    };
                    values.push_unseparated(format!(" AS {ty})"));
                }
            });

            let result = builder.build().execute(&mut *tx).await?;
            appended += result.rows_affected();
        }

        tx.commit().await?;
        Ok(appended)
    }
}

/// Counts rows per table without writing anything.
#[derive(Debug, Default)]
pub struct DryRunSink {
    rows: HashMap<String, u64>,
}

impl DryRunSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows that would have been appended to `table`.
    #[must_use]
    pub fn rows(&self, table: &str) -> u64 {
        self.rows.get(table).copied().unwrap_or(0)
    }
}

impl ChunkSink for DryRunSink {
    async fn append(&mut self, table: &str, chunk: &Chunk) -> Result<u64, LoadError> {
        let rows = chunk.len() as u64;
        *self.rows.entry(table.to_owned()).or_default() += rows;
        Ok(rows)
    }
}

/// Quote an identifier for interpolation into SQL.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// In-memory sink recording every appended row, for loader tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemorySink {
    pub tables: HashMap<String, Vec<Vec<Cell>>>,
    pub columns: HashMap<String, Vec<String>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn rows(&self, table: &str) -> &[Vec<Cell>] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
impl ChunkSink for MemorySink {
    async fn append(&mut self, table: &str, chunk: &Chunk) -> Result<u64, LoadError> {
        self.columns
            .entry(table.to_owned())
            .or_insert_with(|| chunk.columns.clone());
        self.tables
            .entry(table.to_owned())
            .or_default()
            .extend(chunk.rows.iter().cloned());
        Ok(chunk.len() as u64)
    }
}
