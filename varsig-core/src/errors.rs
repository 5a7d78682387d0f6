use thiserror::Error;

#[derive(Error, Debug)]
pub enum VariantError {
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Malformed VCF header: {0}")]
    MalformedHeader(String),

    #[error("Invalid allele pair REF='{ref_allele}' ALT='{alt_allele}': {reason}")]
    InvalidAllele {
        ref_allele: String,
        alt_allele: String,
        reason: String,
    },

    #[error("Invalid genotype '{genotype}': {reason}")]
    InvalidGenotype { genotype: String, reason: String },

    #[error("Substitution '{0}' is not a single base substitution")]
    InvalidSubstitution(String),

    #[error("Position {locus} lies outside the binning extent [0, {extent}]")]
    BinningRange { locus: String, extent: u64 },

    #[error("Number of bins must be positive, got {0}")]
    InvalidBinCount(u32),

    /// A record-level error tagged with the `CHROM:POS` of the record that raised it.
    #[error("{locus}: {source}")]
    AtLocus {
        locus: String,
        #[source]
        source: Box<VariantError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VariantError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        VariantError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    ///
    /// Attach the locus of the offending record
    ///
    pub fn at(self, locus: impl Into<String>) -> Self {
        VariantError::AtLocus {
            locus: locus.into(),
            source: Box::new(self),
        }
    }

    ///
    /// The underlying error, looking through any locus tag
    ///
    pub fn root(&self) -> &VariantError {
        match self {
            VariantError::AtLocus { source, .. } => source.root(),
            other => other,
        }
    }
}
