//! Load progress.

use std::fmt;

/// Rows processed so far, against the total when it was counted up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: u64,
    pub total: Option<u64>,
}

impl Progress {
    #[must_use]
    pub const fn new(processed: u64, total: Option<u64>) -> Self {
        Self { processed, total }
    }

    /// Percentage complete, or `None` when no total is known.
    ///
    /// An empty file is 100% complete.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // row counts stay far below 2^52
    pub fn percent(&self) -> Option<f64> {
        self.total.map(|total| {
            if total == 0 {
                100.0
            } else {
                self.processed as f64 / total as f64 * 100.0
            }
        })
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.total, self.percent()) {
            (Some(total), Some(percent)) => write!(
                f,
                "{}/{} rows ({percent:.1}%)",
                with_thousands(self.processed),
                with_thousands(total)
            ),
            _ => write!(f, "{} rows", with_thousands(self.processed)),
        }
    }
}

/// Format an integer with `,` thousands separators.
#[must_use]
pub fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
