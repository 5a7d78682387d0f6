use std::io::BufRead;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::errors::VariantError;
use crate::models::variant::FIXED_COLUMNS;

///
/// Metadata collected from the `##` meta lines and the `#CHROM` column line of a VCF file.
///
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VcfHeader {
    pub samples: Vec<String>,
    pub contigs: Vec<String>,
    pub filters: Vec<String>,
    pub info_fields: Vec<String>,
}

/// Pull `ID` out of a structured meta line such as `##INFO=<ID=DP,Number=1,...>`.
fn structured_id<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let body = line
        .strip_prefix("##")?
        .strip_prefix(key)?
        .strip_prefix("=<")?
        .strip_suffix('>')?;

    body.split(',').find_map(|part| part.strip_prefix("ID="))
}

impl VcfHeader {
    ///
    /// Feed one header line. Returns `Ok(true)` once the `#CHROM` column line has been consumed.
    ///
    pub fn push_line(&mut self, line: &str) -> Result<bool, VariantError> {
        let line = line.trim_end_matches('\r');

        if line.starts_with("##") {
            if let Some(id) = structured_id(line, "contig") {
                self.contigs.push(id.to_string());
            } else if let Some(id) = structured_id(line, "FILTER") {
                self.filters.push(id.to_string());
            } else if let Some(id) = structured_id(line, "INFO") {
                self.info_fields.push(id.to_string());
            }
            return Ok(false);
        }

        if line.starts_with("#CHROM") {
            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() < FIXED_COLUMNS {
                return Err(VariantError::MalformedHeader(format!(
                    "column line has {} columns, expected at least {}",
                    columns.len(),
                    FIXED_COLUMNS
                )));
            }
            self.samples = columns[FIXED_COLUMNS..]
                .iter()
                .map(|s| s.to_string())
                .collect();
            return Ok(true);
        }

        Ok(false)
    }

    ///
    /// Read only the header of a VCF stream, stopping at the `#CHROM` line.
    ///
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, VariantError> {
        let mut header = VcfHeader::default();
        for line in reader.lines() {
            let line = line?;
            if !line.starts_with('#') {
                break;
            }
            if header.push_line(&line)? {
                return Ok(header);
            }
        }
        Err(VariantError::MalformedHeader(
            "no #CHROM column line found".to_string(),
        ))
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    ///
    /// One-line description of the header, as reported before a run
    ///
    pub fn describe(&self) -> String {
        format!(
            "{} contigs, filter classes: {:?}, info classes: {:?}, {} samples: {:?}",
            self.contigs.len(),
            self.filters,
            self.info_fields,
            self.samples.len(),
            self.samples
        )
    }
}
