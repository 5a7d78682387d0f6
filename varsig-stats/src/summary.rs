//! Aggregate tables handed to the reporting layer.
//!
//! Counts "per Mb" are raw counts divided by one million.

use std::collections::BTreeMap;

use serde::Serialize;

use varsig_core::models::VariantType;

use crate::models::{BinnedTable, SbsTable, VariantTable};

const PER_MB: f64 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledCount {
    pub label: String,
    pub count: u64,
    pub per_mb: f64,
}

impl LabelledCount {
    fn new(label: impl Into<String>, count: u64) -> Self {
        LabelledCount {
            label: label.into(),
            count,
            per_mb: count as f64 / PER_MB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndelLength {
    pub variant_type: VariantType,
    pub length: i64,
}

/// Share of one substitution class carried by one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstitutionShare {
    pub mutation_sign: String,
    pub sample: String,
    pub count: u64,
    /// Percentage of all SBS sample flags in the table
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinCount {
    pub bin: String,
    /// Sum of sample flags, one entry per sample
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChromosomeBins {
    pub chrom: String,
    pub bins: Vec<BinCount>,
}

///
/// Everything the plots are drawn from. Sections whose source table could not
/// be built are left out.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub number_of_variants: usize,
    pub genotype_totals: Vec<LabelledCount>,
    pub variant_types: Vec<LabelledCount>,
    pub indel_lengths: Vec<IndelLength>,
    pub sample_mutations: Vec<LabelledCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitutions: Option<Vec<SubstitutionShare>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_counts: Option<Vec<ChromosomeBins>>,
}

impl Summary {
    pub fn build(
        full: &VariantTable,
        sbs: Option<&SbsTable<'_>>,
        binned: Option<&BinnedTable<'_>>,
    ) -> Summary {
        Summary {
            number_of_variants: full.len(),
            genotype_totals: genotype_totals(full),
            variant_types: variant_types(full),
            indel_lengths: indel_lengths(full),
            sample_mutations: sample_mutations(full),
            substitutions: sbs.map(substitution_shares),
            bin_counts: binned.map(bin_counts),
        }
    }
}

pub fn genotype_totals(full: &VariantTable) -> Vec<LabelledCount> {
    let (mut hom_ref, mut hom_alt, mut het) = (0u64, 0u64, 0u64);
    for variant in &full.records {
        hom_ref += variant.counts.hom_ref as u64;
        hom_alt += variant.counts.hom_alt as u64;
        het += variant.counts.het as u64;
    }

    vec![
        LabelledCount::new("HOM_REF_COUNT", hom_ref),
        LabelledCount::new("HOM_ALT_COUNT", hom_alt),
        LabelledCount::new("HET_COUNT", het),
    ]
}

/// Number of variants of each TYPE present, in TYPE order.
pub fn variant_types(full: &VariantTable) -> Vec<LabelledCount> {
    let mut by_type: BTreeMap<VariantType, u64> = BTreeMap::new();
    for variant in &full.records {
        *by_type.entry(variant.variant_type).or_default() += 1;
    }

    by_type
        .into_iter()
        .map(|(t, n)| LabelledCount::new(t.as_str(), n))
        .collect()
}

pub fn indel_lengths(full: &VariantTable) -> Vec<IndelLength> {
    full.records
        .iter()
        .filter(|v| v.variant_type.is_indel())
        .filter_map(|v| {
            v.length.map(|length| IndelLength {
                variant_type: v.variant_type,
                length,
            })
        })
        .collect()
}

/// Number of variant sites each sample carries an alternate allele at.
pub fn sample_mutations(full: &VariantTable) -> Vec<LabelledCount> {
    let mut totals = vec![0u64; full.n_samples()];
    for variant in &full.records {
        for (total, flag) in totals.iter_mut().zip(&variant.sample_flags) {
            *total += *flag as u64;
        }
    }

    full.sample_columns
        .iter()
        .zip(totals)
        .map(|(name, n)| LabelledCount::new(name.as_str(), n))
        .collect()
}

pub fn substitution_shares(sbs: &SbsTable<'_>) -> Vec<SubstitutionShare> {
    let n_samples = sbs.sample_columns.len();
    let mut per_sign: BTreeMap<_, Vec<u64>> = BTreeMap::new();

    for row in &sbs.records {
        let sums = per_sign
            .entry(row.mutation_sign)
            .or_insert_with(|| vec![0; n_samples]);
        for (sum, flag) in sums.iter_mut().zip(&row.variant.sample_flags) {
            *sum += *flag as u64;
        }
    }

    let grand_total: u64 = per_sign.values().flatten().sum();

    per_sign
        .into_iter()
        .flat_map(|(sign, sums)| {
            sbs.sample_columns
                .iter()
                .zip(sums)
                .map(move |(sample, count)| SubstitutionShare {
                    mutation_sign: sign.to_string(),
                    sample: sample.clone(),
                    count,
                    percentage: if grand_total == 0 {
                        0.0
                    } else {
                        count as f64 / grand_total as f64 * 100.0
                    },
                })
        })
        .collect()
}

/// Per-sample flag sums for each (chromosome, bin), bins in order of first appearance.
pub fn bin_counts(binned: &BinnedTable<'_>) -> Vec<ChromosomeBins> {
    let n_samples = binned.sample_columns.len();
    let mut chromosomes: Vec<ChromosomeBins> = Vec::new();

    for row in &binned.records {
        let chrom = &row.variant.record.chrom;
        if chromosomes.last().is_none_or(|c| &c.chrom != chrom) {
            chromosomes.push(ChromosomeBins {
                chrom: chrom.clone(),
                bins: Vec::new(),
            });
        }
        let Some(current) = chromosomes.last_mut() else {
            continue;
        };

        let label = row.bin.to_string();
        let idx = match current.bins.iter().position(|b| b.bin == label) {
            Some(idx) => idx,
            None => {
                current.bins.push(BinCount {
                    bin: label,
                    counts: vec![0; n_samples],
                });
                current.bins.len() - 1
            }
        };

        for (count, flag) in current.bins[idx].counts.iter_mut().zip(&row.variant.sample_flags) {
            *count += *flag as u64;
        }
    }

    chromosomes
}
