//! Variant TYPE and LENGTH derivation from the REF and ALT allele strings.

use serde::{Deserialize, Serialize};

use varsig_core::VariantError;
use varsig_core::models::VariantType;
use varsig_core::models::variant::MISSING;

/// Symbolic ALT for a structural deletion.
pub const DELETION_TAG: &str = "<DEL>";
/// Symbolic ALT for an inversion.
pub const INVERSION_TAG: &str = "<INV>";
/// Separator between the alleles of a multi-allelic ALT.
pub const ALT_SEPARATOR: char = ',';

/// How LENGTH is reported for insertions and deletions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LengthMode {
    /// DEL: `-len(REF)`, INS: `len(ALT)`
    #[default]
    Allele,
    /// `len(ALT) - len(REF)`
    Net,
}

/// TYPE and LENGTH of one variant. `length` is `None` for everything but INS and DEL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub variant_type: VariantType,
    pub length: Option<i64>,
}

fn is_symbolic(allele: &str) -> bool {
    allele.len() > 2 && allele.starts_with('<') && allele.ends_with('>')
}

fn invalid(ref_allele: &str, alt_allele: &str, reason: &str) -> VariantError {
    VariantError::InvalidAllele {
        ref_allele: ref_allele.to_string(),
        alt_allele: alt_allele.to_string(),
        reason: reason.to_string(),
    }
}

///
/// Classify a variant from its alleles.
///
/// Rules are tried in order and the first match wins:
/// 1. every sequence ALT allele shorter than REF: DEL
/// 2. every sequence ALT allele longer than REF: INS
/// 3. ALT lists more than one allele: MUL_ALT
/// 4. ALT is `<DEL>`: SV
/// 5. ALT is `<INV>`: INV
/// 6. ALT is any other symbolic allele: SV
/// 7. otherwise SNP
///
/// Symbolic alleles (`<...>`) never take part in the length comparison. A
/// missing REF or ALT (`.`) is an [VariantError::InvalidAllele].
pub fn classify(
    ref_allele: &str,
    alt_allele: &str,
    mode: LengthMode,
) -> Result<Classification, VariantError> {
    if ref_allele.is_empty() || ref_allele == "." {
        return Err(invalid(ref_allele, alt_allele, "REF allele is missing"));
    }
    if alt_allele.is_empty() {
        return Err(invalid(ref_allele, alt_allele, "ALT allele is empty"));
    }

    let alleles: Vec<&str> = alt_allele.split(ALT_SEPARATOR).collect();
    if alleles.iter().any(|a| a.is_empty()) {
        return Err(invalid(ref_allele, alt_allele, "ALT contains an empty allele"));
    }
    if alleles.contains(&MISSING) {
        return Err(invalid(ref_allele, alt_allele, "ALT allele is missing"));
    }

    let ref_len = ref_allele.len() as i64;
    let sequence_lengths: Vec<i64> = alleles
        .iter()
        .filter(|a| !is_symbolic(a))
        .map(|a| a.len() as i64)
        .collect();

    if let Some(&longest) = sequence_lengths.iter().max() {
        if sequence_lengths.iter().all(|&len| len < ref_len) {
            let length = match mode {
                LengthMode::Allele => -ref_len,
                LengthMode::Net => longest - ref_len,
            };
            return Ok(Classification {
                variant_type: VariantType::DEL,
                length: Some(length),
            });
        }
        if sequence_lengths.iter().all(|&len| len > ref_len) {
            let length = match mode {
                LengthMode::Allele => longest,
                LengthMode::Net => longest - ref_len,
            };
            return Ok(Classification {
                variant_type: VariantType::INS,
                length: Some(length),
            });
        }
    }

    let variant_type = if alleles.len() > 1 {
        VariantType::MulAlt
    } else if alt_allele == DELETION_TAG {
        VariantType::SV
    } else if alt_allele == INVERSION_TAG {
        VariantType::INV
    } else if is_symbolic(alt_allele) {
        VariantType::SV
    } else {
        VariantType::SNP
    };

    Ok(Classification {
        variant_type,
        length: None,
    })
}
