//! Per-sample zygosity from phased genotype calls.
//!
//! Counts and binary sample flags are both derived from [zygosity], so the
//! two always agree: a flag is 0 exactly when the call is hom-ref.

use varsig_core::VariantError;
use varsig_core::models::{GenotypeCounts, Zygosity};

/// Allele separator of a phased genotype call.
pub const PHASED_SEPARATOR: char = '|';

const REF_CODE: &str = "0";
const ALT_CODE: &str = "1";
const MISSING_CODE: &str = ".";

fn invalid(genotype: &str, reason: impl Into<String>) -> VariantError {
    VariantError::InvalidGenotype {
        genotype: genotype.to_string(),
        reason: reason.into(),
    }
}

///
/// Zygosity of one genotype call such as `0|1`.
///
/// Every `|`-separated token must be an allele index or `.`. All tokens `0`
/// is hom-ref, all tokens `1` is hom-alt, anything else is heterozygous.
/// Any ploidy is accepted.
pub fn zygosity(genotype: &str) -> Result<Zygosity, VariantError> {
    if genotype.is_empty() {
        return Err(invalid(genotype, "empty genotype"));
    }

    let tokens: Vec<&str> = genotype.split(PHASED_SEPARATOR).collect();
    for token in &tokens {
        let is_index = !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit());
        if !is_index && *token != MISSING_CODE {
            return Err(invalid(
                genotype,
                format!("token '{}' is not an allele index", token),
            ));
        }
    }

    if tokens.iter().all(|t| *t == REF_CODE) {
        Ok(Zygosity::HomRef)
    } else if tokens.iter().all(|t| *t == ALT_CODE) {
        Ok(Zygosity::HomAlt)
    } else {
        Ok(Zygosity::Het)
    }
}

///
/// Tally hom-ref, hom-alt and het calls across samples.
///
pub fn resolve<S: AsRef<str>>(genotypes: &[S]) -> Result<GenotypeCounts, VariantError> {
    genotypes.iter().map(|g| zygosity(g.as_ref())).collect()
}

///
/// Binary mutation indicator per sample: 0 for hom-ref, 1 otherwise.
///
pub fn to_sample_flags<S: AsRef<str>>(genotypes: &[S]) -> Result<Vec<u8>, VariantError> {
    genotypes
        .iter()
        .map(|g| zygosity(g.as_ref()).map(|z| z.flag()))
        .collect()
}

///
/// Counts and flags in a single pass over the calls.
///
pub fn resolve_with_flags<S: AsRef<str>>(
    genotypes: &[S],
) -> Result<(GenotypeCounts, Vec<u8>), VariantError> {
    let mut counts = GenotypeCounts::default();
    let mut flags = Vec::with_capacity(genotypes.len());

    for genotype in genotypes {
        let z = zygosity(genotype.as_ref())?;
        counts.add(z);
        flags.push(z.flag());
    }

    Ok((counts, flags))
}
