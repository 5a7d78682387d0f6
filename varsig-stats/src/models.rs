use varsig_core::models::{GenotypeCounts, VariantRecord, VariantType};

use crate::binning::Bin;
use crate::signature::Substitution;

///
/// A parsed record together with everything derived from it: TYPE, LENGTH,
/// zygosity counts and per-sample mutation flags.
///
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRecord {
    pub record: VariantRecord,
    pub variant_type: VariantType,
    /// Signed INDEL length, `None` for every other type
    pub length: Option<i64>,
    pub counts: GenotypeCounts,
    /// 0 for hom-ref, 1 otherwise; one entry per sample
    pub sample_flags: Vec<u8>,
}

/// The full variant table, rows in input order.
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    /// `sample1..sampleN`
    pub sample_columns: Vec<String>,
    pub records: Vec<AnnotatedRecord>,
}

impl VariantTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn n_samples(&self) -> usize {
        self.sample_columns.len()
    }
}

/// A passing SNP with its canonical substitution class.
#[derive(Debug, Clone, Copy)]
pub struct SbsRecord<'a> {
    pub variant: &'a AnnotatedRecord,
    pub mutation_sign: Substitution,
}

/// Passing-SBS table; borrows its rows from the full table.
#[derive(Debug, Clone)]
pub struct SbsTable<'a> {
    pub sample_columns: &'a [String],
    pub records: Vec<SbsRecord<'a>>,
    /// Rows dropped under the skip policy
    pub skipped: usize,
}

/// A record placed in a positional bin.
#[derive(Debug, Clone, Copy)]
pub struct BinnedRecord<'a> {
    pub variant: &'a AnnotatedRecord,
    pub bin: Bin,
}

/// Binned table, chromosomes in order of first appearance.
#[derive(Debug, Clone)]
pub struct BinnedTable<'a> {
    pub sample_columns: &'a [String],
    pub n_bins: u32,
    pub records: Vec<BinnedRecord<'a>>,
}
