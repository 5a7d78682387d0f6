use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::Serialize;

///
/// Class of a variant, derived from its REF and ALT alleles
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[allow(clippy::upper_case_acronyms)]
pub enum VariantType {
    SNP,
    INS,
    DEL,
    #[cfg_attr(feature = "serde", serde(rename = "MUL_ALT"))]
    MulAlt,
    SV,
    INV,
}

impl VariantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantType::SNP => "SNP",
            VariantType::INS => "INS",
            VariantType::DEL => "DEL",
            VariantType::MulAlt => "MUL_ALT",
            VariantType::SV => "SV",
            VariantType::INV => "INV",
        }
    }

    pub fn is_indel(&self) -> bool {
        matches!(self, VariantType::INS | VariantType::DEL)
    }
}

impl Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
