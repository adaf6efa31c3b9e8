//! Order status label.
//!
//! `orders.status` is free text in the stored schema: the loader copies
//! whatever the source file holds. [`OrderStatus`] keeps that open string so no
//! row is ever rejected or rewritten, while [`KnownOrderStatus`] names the
//! labels the source dataset actually uses.

use serde::{Deserialize, Serialize};

/// Status labels observed in the order dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownOrderStatus {
    Processing,
    Shipped,
    Complete,
    Cancelled,
    Returned,
}

impl KnownOrderStatus {
    /// All known statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Processing,
        Self::Shipped,
        Self::Complete,
        Self::Cancelled,
        Self::Returned,
    ];

    /// The label as stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Complete => "Complete",
            Self::Cancelled => "Cancelled",
            Self::Returned => "Returned",
        }
    }
}

impl std::fmt::Display for KnownOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text order status.
///
/// Filtering by status is an exact, case-sensitive match on this string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    /// Wrap a status label as-is.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recognise the label as one of the known statuses, ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn known(&self) -> Option<KnownOrderStatus> {
        let label = self.0.trim();
        KnownOrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(label))
    }
}

impl From<KnownOrderStatus> for OrderStatus {
    fn from(status: KnownOrderStatus) -> Self {
        Self(status.as_str().to_owned())
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OrderStatus {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
