//! Core data model for varsig.
//!
//! Holds the strongly typed VCF record ([models::VariantRecord]), the header
//! metadata reader ([models::VcfHeader]), the whole-file reader
//! ([models::VariantSet]) and the error type shared by every pipeline stage.
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::VariantError;
