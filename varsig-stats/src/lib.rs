//! Variant classification and statistics for VCF files.
//!
//! Given a parsed [varsig_core::models::VariantSet] this crate builds three
//! tables:
//!
//! - the full table: every record with TYPE, LENGTH, zygosity counts and
//!   per-sample mutation flags
//! - the SBS table: passing SNPs labelled with one of the six canonical
//!   substitution classes
//! - the binned table: every record assigned to an equal-width positional bin
//!
//! plus the [summary::Summary] aggregates drawn from them.
//!
//! # Example
//!
//! ```no_run
//! use varsig_core::models::VariantSet;
//! use varsig_stats::{RunConfig, annotate, derive_tables};
//!
//! let set = VariantSet::try_from("input.vcf").unwrap();
//! let config = RunConfig::default();
//!
//! let full = annotate(set, config.length_mode).unwrap();
//! let derived = derive_tables(&full, &config);
//! ```

pub mod binning;
pub mod classify;
pub mod errors;
pub mod extractor;
pub mod genotype;
pub mod models;
pub mod pipeline;
pub mod signature;
pub mod summary;

// re-exports
pub use binning::{Bin, BinExtent, OutOfRangePolicy, bin_records};
pub use classify::{Classification, LengthMode, classify};
pub use extractor::{CommandExtractor, SignatureExtractor};
pub use models::{AnnotatedRecord, BinnedRecord, BinnedTable, SbsRecord, SbsTable, VariantTable};
pub use pipeline::{DerivedTables, RunConfig, annotate, derive_tables};
pub use signature::{InvalidRecordPolicy, SbsFilter, Substitution, normalize};
pub use summary::Summary;
