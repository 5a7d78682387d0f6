//! Single base substitution (SBS) signatures.
//!
//! Passing SNPs are labelled `REF>ALT`, then purine-referenced labels are
//! folded onto their pyrimidine-referenced complement so that only the six
//! canonical classes remain.

use std::fmt::{self, Display};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use varsig_core::VariantError;
use varsig_core::models::VariantType;

use crate::models::{AnnotatedRecord, SbsTable, SbsRecord, VariantTable};

/// FILTER value of a record that passed every filter.
pub const PASS: &str = "PASS";

/// Purine-referenced label and its pyrimidine-referenced complement.
const COMPLEMENT: [(&str, &str); 6] = [
    ("G>T", "C>A"),
    ("G>C", "C>G"),
    ("G>A", "C>T"),
    ("A>T", "T>A"),
    ("A>G", "T>C"),
    ("A>C", "T>G"),
];

/// The six canonical pyrimidine-referenced substitution classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Substitution {
    CtoA,
    CtoG,
    CtoT,
    TtoA,
    TtoC,
    TtoG,
}

impl Substitution {
    pub const ALL: [Substitution; 6] = [
        Substitution::CtoA,
        Substitution::CtoG,
        Substitution::CtoT,
        Substitution::TtoA,
        Substitution::TtoC,
        Substitution::TtoG,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Substitution::CtoA => "C>A",
            Substitution::CtoG => "C>G",
            Substitution::CtoT => "C>T",
            Substitution::TtoA => "T>A",
            Substitution::TtoC => "T>C",
            Substitution::TtoG => "T>G",
        }
    }

    ///
    /// Parse an already canonical label; purine-referenced labels give `None`.
    ///
    pub fn from_sign(sign: &str) -> Option<Substitution> {
        Substitution::ALL.into_iter().find(|s| s.as_str() == sign)
    }

    ///
    /// Canonical class of a single base substitution `ref_allele>alt_allele`.
    ///
    /// Alleles are compared case-insensitively. Anything that does not fold
    /// onto one of the six classes is an [VariantError::InvalidSubstitution].
    pub fn from_alleles(ref_allele: &str, alt_allele: &str) -> Result<Substitution, VariantError> {
        let sign = format!(
            "{}>{}",
            ref_allele.to_ascii_uppercase(),
            alt_allele.to_ascii_uppercase()
        );
        Substitution::from_sign(canonical_sign(&sign))
            .ok_or(VariantError::InvalidSubstitution(sign))
    }
}

impl Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Apply the complement table to a `REF>ALT` label. Labels that are not
/// table keys pass through untouched, so applying this twice is the same as
/// applying it once.
///
pub fn canonical_sign(sign: &str) -> &str {
    COMPLEMENT
        .iter()
        .find(|(purine, _)| *purine == sign)
        .map(|(_, pyrimidine)| *pyrimidine)
        .unwrap_or(sign)
}

///
/// Which records enter the SBS table. Exactly one mode applies per run.
///
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SbsFilter {
    /// QUAL strictly above the threshold
    Quality(f64),
    /// FILTER equal to `PASS`
    #[default]
    Pass,
}

impl SbsFilter {
    /// Threshold mode when a threshold is given, FILTER mode otherwise.
    pub fn from_threshold(threshold: Option<f64>) -> SbsFilter {
        match threshold {
            Some(q) => SbsFilter::Quality(q),
            None => SbsFilter::Pass,
        }
    }

    pub fn keeps(&self, variant: &AnnotatedRecord) -> bool {
        if variant.variant_type != VariantType::SNP {
            return false;
        }
        match self {
            SbsFilter::Quality(threshold) => variant.record.qual.is_some_and(|q| q > *threshold),
            SbsFilter::Pass => variant.record.filter == PASS,
        }
    }
}

/// What to do with a selected record whose alleles do not form a valid substitution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidRecordPolicy {
    /// Fail the whole SBS stage
    #[default]
    Fail,
    /// Drop the record with a warning
    Skip,
}

///
/// Build the passing-SBS table from the full table.
///
/// Row order follows the full table.
pub fn normalize<'a>(
    table: &'a VariantTable,
    filter: SbsFilter,
    policy: InvalidRecordPolicy,
) -> Result<SbsTable<'a>, VariantError> {
    let mut records = Vec::new();
    let mut skipped = 0;

    for variant in table.records.iter().filter(|v| filter.keeps(v)) {
        let record = &variant.record;
        match Substitution::from_alleles(&record.ref_allele, &record.alt_allele) {
            Ok(mutation_sign) => records.push(SbsRecord {
                variant,
                mutation_sign,
            }),
            Err(e) => match policy {
                InvalidRecordPolicy::Fail => return Err(e.at(record.locus())),
                InvalidRecordPolicy::Skip => {
                    warn!("Skipping {} from the SBS table: {}", record.locus(), e);
                    skipped += 1;
                }
            },
        }
    }

    info!(
        "SBS table: {} of {} records selected with {:?}",
        records.len(),
        table.len(),
        filter
    );

    Ok(SbsTable {
        sample_columns: &table.sample_columns,
        records,
        skipped,
    })
}
