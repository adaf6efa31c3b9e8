//! Order Dashboard Core - Shared domain types.
//!
//! This crate provides the types shared by every component of the order
//! dashboard:
//! - `ingest` - Bulk CSV loader that populates the relational store
//! - `api` - Read-only HTTP API over customers and orders
//! - `cli` - Command-line tools for migrations and data loading
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. The optional `postgres` feature adds `sqlx` encoding for the
//! id and status types so repositories can bind them directly.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, order status, money arithmetic, pagination and date ranges

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
