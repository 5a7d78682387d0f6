//! Orchestration of the classification, signature and binning stages.
//!
//! The full table is built first; the SBS and binned tables are then derived
//! from a shared read-only borrow of it and can fail independently.

use log::{info, warn};

use varsig_core::VariantError;
use varsig_core::models::{VariantRecord, VariantSet};

use crate::binning::{BinExtent, OutOfRangePolicy, bin_records};
use crate::classify::{LengthMode, classify};
use crate::genotype::resolve_with_flags;
use crate::models::{AnnotatedRecord, BinnedTable, SbsTable, VariantTable};
use crate::signature::{InvalidRecordPolicy, SbsFilter, normalize};

/// Default number of positional bins per chromosome.
pub const DEFAULT_BINS: u32 = 20;

///
/// Settings for one run, passed explicitly to every stage.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    pub sbs_filter: SbsFilter,
    pub n_bins: u32,
    pub bin_extent: BinExtent,
    pub out_of_range: OutOfRangePolicy,
    pub invalid_sbs: InvalidRecordPolicy,
    pub length_mode: LengthMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            sbs_filter: SbsFilter::Pass,
            n_bins: DEFAULT_BINS,
            bin_extent: BinExtent::default(),
            out_of_range: OutOfRangePolicy::default(),
            invalid_sbs: InvalidRecordPolicy::default(),
            length_mode: LengthMode::default(),
        }
    }
}

///
/// Derive TYPE, LENGTH, zygosity counts and sample flags for one record.
///
pub fn annotate_record(
    record: VariantRecord,
    mode: LengthMode,
) -> Result<AnnotatedRecord, VariantError> {
    let classification =
        classify(&record.ref_allele, &record.alt_allele, mode).map_err(|e| e.at(record.locus()))?;
    let (counts, sample_flags) =
        resolve_with_flags(&record.genotypes).map_err(|e| e.at(record.locus()))?;

    Ok(AnnotatedRecord {
        record,
        variant_type: classification.variant_type,
        length: classification.length,
        counts,
        sample_flags,
    })
}

///
/// Build the full variant table. The first record that fails to classify
/// aborts the build.
///
pub fn annotate(set: VariantSet, mode: LengthMode) -> Result<VariantTable, VariantError> {
    let sample_columns = set.sample_columns();
    let records = set
        .records
        .into_iter()
        .map(|record| annotate_record(record, mode))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "Annotated {} records across {} samples",
        records.len(),
        sample_columns.len()
    );

    Ok(VariantTable {
        sample_columns,
        records,
    })
}

/// The two tables derived from the full table, each with its own outcome.
#[derive(Debug)]
pub struct DerivedTables<'a> {
    pub sbs: Result<SbsTable<'a>, VariantError>,
    pub binned: Result<BinnedTable<'a>, VariantError>,
}

impl DerivedTables<'_> {
    pub fn all_ok(&self) -> bool {
        self.sbs.is_ok() && self.binned.is_ok()
    }
}

///
/// Run the SBS and binning stages side by side over the full table.
///
pub fn derive_tables<'a>(table: &'a VariantTable, config: &RunConfig) -> DerivedTables<'a> {
    let (sbs, binned) = rayon::join(
        || normalize(table, config.sbs_filter, config.invalid_sbs),
        || bin_records(table, config.n_bins, config.bin_extent, config.out_of_range),
    );

    if let Err(e) = &sbs {
        warn!("SBS stage failed: {}", e);
    }
    if let Err(e) = &binned {
        warn!("Binning stage failed: {}", e);
    }

    DerivedTables { sbs, binned }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use varsig_core::models::{GenotypeCounts, VariantType};

    const HEADER: &str = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\ts1\ts2\ts3\n";

    fn set_from(body: &str) -> VariantSet {
        let text = format!("{}{}", HEADER, body);
        VariantSet::from_reader(text.as_bytes()).unwrap()
    }

    #[rstest]
    fn test_three_record_scenario() {
        let set = set_from(
            "chr1\t10\t.\tA\tT\t50\tPASS\tDP=1\tGT\t0|0\t0|0\t0|0\n\
             chr1\t20\t.\tAT\tA\t50\tPASS\tDP=1\tGT\t0|0\t0|0\t0|0\n\
             chr1\t30\t.\tA\tATT\t50\tPASS\tDP=1\tGT\t0|0\t0|0\t0|0\n",
        );
        let table = annotate(set, LengthMode::Net).unwrap();

        let types: Vec<VariantType> = table.records.iter().map(|r| r.variant_type).collect();
        let lengths: Vec<Option<i64>> = table.records.iter().map(|r| r.length).collect();

        assert_eq!(types, vec![VariantType::SNP, VariantType::DEL, VariantType::INS]);
        assert_eq!(lengths, vec![None, Some(-1), Some(2)]);
        for r in &table.records {
            assert_eq!(
                r.counts,
                GenotypeCounts {
                    hom_ref: 3,
                    hom_alt: 0,
                    het: 0
                }
            );
            assert_eq!(r.sample_flags, vec![0, 0, 0]);
        }
    }

    #[rstest]
    fn test_allele_length_mode() {
        let set = set_from(
            "chr1\t20\t.\tAT\tA\t50\tPASS\tDP=1\tGT\t0|0\t0|0\t0|0\n\
             chr1\t30\t.\tA\tATT\t50\tPASS\tDP=1\tGT\t0|0\t0|0\t0|0\n",
        );
        let table = annotate(set, LengthMode::Allele).unwrap();
        let lengths: Vec<Option<i64>> = table.records.iter().map(|r| r.length).collect();

        assert_eq!(lengths, vec![Some(-2), Some(3)]);
    }

    #[rstest]
    fn test_bad_genotype_is_tagged_with_locus() {
        let set = set_from("chr3\t77\t.\tA\tT\t50\tPASS\tDP=1\tGT\t0|0\t0/1\t0|0\n");
        let err = annotate(set, LengthMode::Allele).unwrap_err();

        assert_eq!(err.to_string().starts_with("chr3:77"), true);
        assert!(matches!(err.root(), VariantError::InvalidGenotype { .. }));
    }

    #[rstest]
    fn test_missing_alt_is_rejected_not_a_snp() {
        let set = set_from(
            "chr1\t10\t.\tG\tA\t50\tPASS\tDP=1\tGT\t0|1\t0|0\t0|0\n\
             chr1\t20\t.\tC\t.\t50\tPASS\tDP=1\tGT\t0|0\t0|0\t0|0\n",
        );
        let err = annotate(set, LengthMode::Allele).unwrap_err();

        assert_eq!(err.to_string().starts_with("chr1:20"), true);
        assert!(matches!(err.root(), VariantError::InvalidAllele { .. }));
    }

    #[rstest]
    fn test_derived_stages_fail_independently() {
        let set = set_from(
            "chr1\t10\t.\tG\tA\t50\tPASS\tDP=1\tGT\t0|1\t0|0\t0|0\n\
             chr1\t20\t.\tA\tT\t50\tPASS\tDP=1\tGT\t0|0\t1|1\t0|0\n",
        );
        let table = annotate(set, LengthMode::Allele).unwrap();
        let config = RunConfig {
            n_bins: 0,
            ..RunConfig::default()
        };

        let derived = derive_tables(&table, &config);

        assert_eq!(derived.all_ok(), false);
        assert_eq!(derived.sbs.as_ref().map(|t| t.records.len()).ok(), Some(2));
        assert!(matches!(derived.binned, Err(VariantError::InvalidBinCount(0))));
        // the full table is untouched
        assert_eq!(table.len(), 2);
    }
}
