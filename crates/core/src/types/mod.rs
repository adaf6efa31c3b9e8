//! Core types for the order dashboard.
//!
//! This module provides type-safe wrappers for the domain concepts shared by
//! the loader and the query layer.

pub mod date_range;
pub mod id;
pub mod money;
pub mod pagination;
pub mod status;

pub use date_range::{CreatedRange, InvalidDateRange};
pub use id::*;
pub use money::{line_total, order_total};
pub use pagination::Pagination;
pub use status::{KnownOrderStatus, OrderStatus};
