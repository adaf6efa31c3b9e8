//! Offset/limit window for list queries.

use serde::{Deserialize, Serialize};

/// A page window: skip `skip` rows, then return at most `limit`.
///
/// Out-of-range inputs are clamped rather than rejected: `skip` to `>= 0` and
/// `limit` to `1..=MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
}

impl Pagination {
    /// Page size used when the caller does not supply one.
    pub const DEFAULT_LIMIT: i64 = 10;
    /// Largest page a caller may request.
    pub const MAX_LIMIT: i64 = 100;

    /// Build a window from optional caller input.
    #[must_use]
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            skip: skip.unwrap_or(0).max(0),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Value for SQL `OFFSET`.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.skip
    }

    /// Value for SQL `LIMIT`.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}
