use std::fmt::{self, Display};

use crate::errors::VariantError;

/// Number of fixed VCF columns preceding the per-sample genotype columns.
pub const FIXED_COLUMNS: usize = 9;

/// Separator between `key=value` entries of the INFO column.
const INFO_SEPARATOR: char = ';';

/// VCF marker for a missing value.
pub const MISSING: &str = ".";

///
/// INFO column of a variant, parsed into ordered `key=value` pairs.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoField {
    entries: Vec<(String, String)>,
}

impl InfoField {
    ///
    /// Parse a raw INFO column. Every `;`-separated entry must be `key=value`;
    /// the missing marker `.` gives an empty field.
    ///
    /// Returns the reason on failure so the caller can attach a location.
    pub fn parse(raw: &str) -> Result<Self, String> {
        if raw == MISSING || raw.is_empty() {
            return Ok(InfoField::default());
        }

        let mut entries = Vec::new();
        for entry in raw.split(INFO_SEPARATOR) {
            match entry.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    entries.push((key.to_string(), value.to_string()));
                }
                _ => return Err(format!("INFO entry '{}' is not key=value", entry)),
            }
        }

        Ok(InfoField { entries })
    }

    /// Value for `key`; the last occurrence wins when a key repeats.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

}

impl Display for InfoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "{}", MISSING);
        }
        let joined: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        write!(f, "{}", joined.join(";"))
    }
}

///
/// VariantRecord struct, one data line of a VCF file
///
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chrom: String,
    /// 1-based position
    pub pos: u64,
    pub id: String,
    pub ref_allele: String,
    pub alt_allele: String,
    pub qual: Option<f64>,
    pub filter: String,
    pub info: InfoField,
    pub format: String,
    /// GT call per sample, in header order
    pub genotypes: Vec<String>,
}

impl VariantRecord {
    ///
    /// Parse one tab-delimited data line carrying exactly `n_samples` sample columns.
    ///
    /// # Arguments
    /// - line: the raw line, without the trailing newline
    /// - line_number: 1-based line number, used in error messages
    /// - n_samples: sample count declared in the header
    pub fn parse(line: &str, line_number: usize, n_samples: usize) -> Result<Self, VariantError> {
        let fields: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();

        let expected = FIXED_COLUMNS + n_samples;
        if fields.len() != expected {
            return Err(VariantError::malformed(
                line_number,
                format!("expected {} columns, found {}", expected, fields.len()),
            ));
        }

        let pos = fields[1].parse::<u64>().map_err(|_| {
            VariantError::malformed(line_number, format!("invalid POS '{}'", fields[1]))
        })?;

        let qual = match fields[5] {
            MISSING => None,
            raw => Some(raw.parse::<f64>().map_err(|_| {
                VariantError::malformed(line_number, format!("invalid QUAL '{}'", raw))
            })?),
        };

        let info =
            InfoField::parse(fields[7]).map_err(|reason| VariantError::malformed(line_number, reason))?;

        // only the GT sub-field is kept; VCF requires it to come first
        let genotypes = fields[FIXED_COLUMNS..]
            .iter()
            .map(|sample| sample.split(':').next().unwrap_or_default().to_string())
            .collect();

        Ok(VariantRecord {
            chrom: fields[0].to_string(),
            pos,
            id: fields[2].to_string(),
            ref_allele: fields[3].to_string(),
            alt_allele: fields[4].to_string(),
            qual,
            filter: fields[6].to_string(),
            info,
            format: fields[8].to_string(),
            genotypes,
        })
    }

    ///
    /// `CHROM:POS` string used to point at this record in messages
    ///
    pub fn locus(&self) -> String {
        format!("{}:{}", self.chrom, self.pos)
    }

    pub fn sample_count(&self) -> usize {
        self.genotypes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_parse_record() {
        let line = "chr1\t100\trs1\tA\tT\t50.5\tPASS\tDP=10;AF=0.5\tGT\t0|0\t0|1";
        let record = VariantRecord::parse(line, 3, 2).unwrap();

        assert_eq!(record.chrom, "chr1");
        assert_eq!(record.pos, 100);
        assert_eq!(record.qual, Some(50.5));
        assert_eq!(record.info.get("DP"), Some("10"));
        assert_eq!(record.info.get("AF"), Some("0.5"));
        assert_eq!(record.genotypes, vec!["0|0".to_string(), "0|1".to_string()]);
        assert_eq!(record.locus(), "chr1:100");
    }

    #[rstest]
    fn test_parse_missing_qual_and_info() {
        let line = "chr2\t5\t.\tG\tC\t.\tq10\t.\tGT\t1|1";
        let record = VariantRecord::parse(line, 1, 1).unwrap();

        assert_eq!(record.qual, None);
        assert_eq!(record.info, InfoField::default());
        assert_eq!(record.info.to_string(), ".");
    }

    #[rstest]
    fn test_parse_keeps_gt_subfield_only() {
        let line = "chr1\t7\t.\tC\tA\t20\tPASS\tDP=3\tGT:DP\t0|1:12";
        let record = VariantRecord::parse(line, 1, 1).unwrap();

        assert_eq!(record.format, "GT:DP");
        assert_eq!(record.genotypes, vec!["0|1".to_string()]);
    }

    #[rstest]
    #[case("chr1\t100\t.\tA\tT\t50\tPASS\tDP=1\tGT\t0|0")]
    #[case("chr1\t100\t.\tA\tT\t50\tPASS\tDP=1\tGT\t0|0\t0|0\t0|0")]
    #[case("chr1\tabc\t.\tA\tT\t50\tPASS\tDP=1\tGT\t0|0\t0|0")]
    #[case("chr1\t100\t.\tA\tT\thigh\tPASS\tDP=1\tGT\t0|0\t0|0")]
    #[case("chr1\t100\t.\tA\tT\t50\tPASS\tDP=1;SOMATIC\tGT\t0|0\t0|0")]
    #[case("chr1\t100\t.\tA\tT\t50\tPASS\t=1\tGT\t0|0\t0|0")]
    fn test_parse_malformed(#[case] line: &str) {
        let result = VariantRecord::parse(line, 12, 2);
        assert!(matches!(
            result,
            Err(VariantError::MalformedRecord { line: 12, .. })
        ));
    }

    #[rstest]
    fn test_info_value_may_contain_equals() {
        let info = InfoField::parse("ANN=a=b;DP=4").unwrap();
        assert_eq!(info.get("ANN"), Some("a=b"));
        assert_eq!(info.to_string(), "ANN=a=b;DP=4");
    }
}
