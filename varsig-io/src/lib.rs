//! # Output utilities for varsig.
//!
//! Writes the full, SBS and binned variant tables to disk as CSV or gzipped
//! CSV, one row per record in table order.
//!
pub mod error;
pub mod tables;

// re-expose core functions
pub use error::*;
pub use tables::*;
