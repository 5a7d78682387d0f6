//! Equal-width positional bins along each chromosome.

use std::fmt::{self, Display};

use fxhash::FxHashMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use varsig_core::VariantError;

use crate::models::{AnnotatedRecord, BinnedRecord, BinnedTable, VariantTable};

/// 1-based bin number, rendered as `Bin1..BinN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bin(pub u32);

impl Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bin{}", self.0)
    }
}

/// Where the upper edge of the binned range comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinExtent {
    /// POS of the last row of the whole table, shared by every chromosome.
    /// Matches earlier outputs; chromosomes longer than that position spill
    /// past the last bin.
    #[default]
    LastRecord,
    /// Largest POS seen on each chromosome.
    ChromosomeMax,
}

/// Handling of positions beyond the extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutOfRangePolicy {
    /// Put the record in the last bin
    #[default]
    Clamp,
    /// Fail the binning stage
    Reject,
}

///
/// Bin of `pos` when `[0, extent]` is cut into `n_bins` right-closed bins of
/// equal width. Position 0 falls in the first bin. Returns `None` for
/// positions past the extent.
///
pub fn bin_index(pos: u64, extent: u64, n_bins: u32) -> Option<Bin> {
    if pos > extent {
        return None;
    }
    if pos == 0 {
        return Some(Bin(1));
    }

    // ceil(pos * n / extent); extent > 0 here since 0 < pos <= extent
    let n = n_bins as u128;
    let scaled = pos as u128 * n;
    let extent = extent as u128;
    let idx = scaled.div_ceil(extent);

    Some(Bin(idx.clamp(1, n) as u32))
}

/// Chromosomes in order of first appearance, each with its rows in input order.
fn group_by_chromosome(records: &[AnnotatedRecord]) -> Vec<(&str, Vec<&AnnotatedRecord>)> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<(&str, Vec<&AnnotatedRecord>)> = Vec::new();

    for variant in records {
        let chrom = variant.record.chrom.as_str();
        let slot = *index.entry(chrom).or_insert_with(|| {
            groups.push((chrom, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(variant);
    }

    groups
}

///
/// Assign every record of the full table to one of `n_bins` positional bins.
///
/// Rows are grouped per chromosome (first-appearance order) and keep their
/// input order within a chromosome, so the output always has as many rows as
/// the input under [OutOfRangePolicy::Clamp].
pub fn bin_records<'a>(
    table: &'a VariantTable,
    n_bins: u32,
    extent: BinExtent,
    policy: OutOfRangePolicy,
) -> Result<BinnedTable<'a>, VariantError> {
    if n_bins == 0 {
        return Err(VariantError::InvalidBinCount(n_bins));
    }

    let global_extent = table.records.last().map(|v| v.record.pos).unwrap_or(0);
    let mut records = Vec::with_capacity(table.len());

    for (chrom, variants) in group_by_chromosome(&table.records) {
        let chrom_extent = match extent {
            BinExtent::LastRecord => global_extent,
            BinExtent::ChromosomeMax => variants.iter().map(|v| v.record.pos).max().unwrap_or(0),
        };
        debug!("Binning {} records on {} over [0, {}]", variants.len(), chrom, chrom_extent);

        for variant in variants {
            let bin = match bin_index(variant.record.pos, chrom_extent, n_bins) {
                Some(bin) => bin,
                None => match policy {
                    OutOfRangePolicy::Clamp => Bin(n_bins),
                    OutOfRangePolicy::Reject => {
                        return Err(VariantError::BinningRange {
                            locus: variant.record.locus(),
                            extent: chrom_extent,
                        });
                    }
                },
            };
            records.push(BinnedRecord { variant, bin });
        }
    }

    info!("Binned {} records into {} bins", records.len(), n_bins);

    Ok(BinnedTable {
        sample_columns: &table.sample_columns,
        n_bins,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::classify::LengthMode;
    use crate::pipeline::annotate_record;
    use varsig_core::models::VariantRecord;

    fn variant(chrom: &str, pos: u64) -> AnnotatedRecord {
        let record = VariantRecord {
            chrom: chrom.to_string(),
            pos,
            id: ".".to_string(),
            ref_allele: "A".to_string(),
            alt_allele: "T".to_string(),
            qual: None,
            filter: "PASS".to_string(),
            info: Default::default(),
            format: "GT".to_string(),
            genotypes: vec!["0|1".to_string()],
        };
        annotate_record(record, LengthMode::Allele).unwrap()
    }

    #[fixture]
    fn table() -> VariantTable {
        VariantTable {
            sample_columns: vec!["sample1".to_string()],
            records: vec![
                variant("chr1", 100),
                variant("chr2", 50),
                variant("chr1", 450),
                variant("chr1", 1200),
                variant("chr2", 300),
                variant("chr2", 600),
            ],
        }
    }

    #[rstest]
    fn test_bin_label() {
        assert_eq!(Bin(3).to_string(), "Bin3");
    }

    #[rstest]
    #[case(0, Some(1))]
    #[case(1, Some(1))]
    #[case(300, Some(1))]
    #[case(301, Some(2))]
    #[case(600, Some(2))]
    #[case(899, Some(3))]
    #[case(900, Some(3))]
    #[case(901, None)]
    fn test_bin_index(#[case] pos: u64, #[case] expected: Option<u32>) {
        assert_eq!(bin_index(pos, 900, 3).map(|b| b.0), expected);
    }

    #[rstest]
    fn test_bin_index_zero_extent() {
        assert_eq!(bin_index(0, 0, 4), Some(Bin(1)));
        assert_eq!(bin_index(1, 0, 4), None);
    }

    #[rstest]
    fn test_groups_chromosomes_in_first_appearance_order(table: VariantTable) {
        let binned = bin_records(&table, 3, BinExtent::LastRecord, OutOfRangePolicy::Clamp).unwrap();
        let rows: Vec<(&str, u64)> = binned
            .records
            .iter()
            .map(|r| (r.variant.record.chrom.as_str(), r.variant.record.pos))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("chr1", 100),
                ("chr1", 450),
                ("chr1", 1200),
                ("chr2", 50),
                ("chr2", 300),
                ("chr2", 600),
            ]
        );
    }

    #[rstest]
    fn test_last_record_extent_with_clamp(table: VariantTable) {
        // extent is 600, the POS of the last row
        let binned = bin_records(&table, 3, BinExtent::LastRecord, OutOfRangePolicy::Clamp).unwrap();
        let bins: Vec<u32> = binned.records.iter().map(|r| r.bin.0).collect();

        assert_eq!(bins, vec![1, 3, 3, 1, 2, 3]);
        assert_eq!(binned.records.len(), table.len());
    }

    #[rstest]
    fn test_last_record_extent_with_reject(table: VariantTable) {
        let result = bin_records(&table, 3, BinExtent::LastRecord, OutOfRangePolicy::Reject);
        assert!(matches!(
            result,
            Err(VariantError::BinningRange { extent: 600, .. })
        ));
    }

    #[rstest]
    fn test_chromosome_max_extent(table: VariantTable) {
        let binned =
            bin_records(&table, 3, BinExtent::ChromosomeMax, OutOfRangePolicy::Reject).unwrap();
        let bins: Vec<u32> = binned.records.iter().map(|r| r.bin.0).collect();

        // chr1 over [0, 1200], chr2 over [0, 600]
        assert_eq!(bins, vec![1, 2, 3, 1, 2, 3]);
    }

    #[rstest]
    fn test_zero_bins(table: VariantTable) {
        let result = bin_records(&table, 0, BinExtent::LastRecord, OutOfRangePolicy::Clamp);
        assert!(matches!(result, Err(VariantError::InvalidBinCount(0))));
    }

    #[rstest]
    fn test_empty_table() {
        let table = VariantTable::default();
        let binned = bin_records(&table, 5, BinExtent::LastRecord, OutOfRangePolicy::Reject).unwrap();
        assert_eq!(binned.records.is_empty(), true);
    }
}
