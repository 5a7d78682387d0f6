use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::errors::VariantError;
use crate::models::{VariantRecord, VcfHeader};
use crate::utils::{get_dynamic_reader, sample_columns};

///
/// VariantSet struct, every data record of one VCF file in input order,
/// together with its header metadata.
///
#[derive(Clone, Debug)]
pub struct VariantSet {
    pub header: VcfHeader,
    pub records: Vec<VariantRecord>,
    pub path: Option<PathBuf>,
}

impl VariantSet {
    ///
    /// Parse a VCF stream: header first, then one [VariantRecord] per data line.
    ///
    /// Lines before `#CHROM` must be header lines; the first malformed data
    /// line aborts the read.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, VariantError> {
        let mut header = VcfHeader::default();
        let mut header_done = false;
        let mut records = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = idx + 1;

            if line.starts_with('#') {
                if !header_done {
                    header_done = header.push_line(&line)?;
                }
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            if !header_done {
                return Err(VariantError::MalformedHeader(format!(
                    "data line {} appears before the #CHROM column line",
                    line_number
                )));
            }

            records.push(VariantRecord::parse(&line, line_number, header.sample_count())?);
        }

        if !header_done {
            return Err(VariantError::MalformedHeader(
                "no #CHROM column line found".to_string(),
            ));
        }

        Ok(VariantSet {
            header,
            records,
            path: None,
        })
    }

    ///
    /// Positional sample names (`sample1..sampleN`) used as output column names
    ///
    pub fn sample_columns(&self) -> Vec<String> {
        sample_columns(self.header.sample_count())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariantRecord> {
        self.records.iter()
    }
}

impl TryFrom<&Path> for VariantSet {
    type Error = anyhow::Error;

    ///
    /// Create a new [VariantSet] from a vcf or vcf.gz file.
    ///
    /// # Arguments:
    /// - value: path to vcf file on disk.
    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)?;
        let mut set = VariantSet::from_reader(reader)?;
        set.path = Some(value.to_owned());
        Ok(set)
    }
}

impl TryFrom<&str> for VariantSet {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        VariantSet::try_from(Path::new(value))
    }
}

impl TryFrom<String> for VariantSet {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        VariantSet::try_from(Path::new(&value))
    }
}

impl TryFrom<PathBuf> for VariantSet {
    type Error = anyhow::Error;

    fn try_from(value: PathBuf) -> Result<Self> {
        VariantSet::try_from(value.as_path())
    }
}

impl<'a> IntoIterator for &'a VariantSet {
    type Item = &'a VariantRecord;
    type IntoIter = std::slice::Iter<'a, VariantRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/vcf")
            .join(file_name)
    }

    #[rstest]
    fn test_open_from_path() {
        let set = VariantSet::try_from(get_test_path("small.vcf")).unwrap();

        assert_eq!(set.header.sample_count(), 3);
        assert_eq!(set.len(), 8);
        assert_eq!(set.records[0].chrom, "chr1");
        assert_eq!(set.records[0].pos, 100);
        assert_eq!(set.sample_columns(), vec!["sample1", "sample2", "sample3"]);
        assert_eq!(set.path.is_some(), true);
    }

    #[rstest]
    fn test_record_order_is_input_order() {
        let set = VariantSet::try_from(get_test_path("small.vcf")).unwrap();
        let loci: Vec<String> = set.iter().map(|r| r.locus()).collect();

        assert_eq!(loci.first().map(String::as_str), Some("chr1:100"));
        assert_eq!(loci.last().map(String::as_str), Some("chr2:900"));
    }

    #[rstest]
    fn test_malformed_line_reports_line_number() {
        let text = "##fileformat=VCFv4.2\n\
                    #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\ts1\n\
                    chr1\t1\t.\tA\tT\t.\tPASS\tDP=1\tGT\t0|0\n\
                    chr1\t2\t.\tA\tT\t.\tPASS\tDP=1\tGT\n";
        let result = VariantSet::from_reader(text.as_bytes());

        assert!(matches!(
            result,
            Err(VariantError::MalformedRecord { line: 4, .. })
        ));
    }

    #[rstest]
    fn test_data_before_column_line() {
        let text = "chr1\t1\t.\tA\tT\t.\tPASS\tDP=1\tGT\t0|0\n";
        let result = VariantSet::from_reader(text.as_bytes());
        assert!(matches!(result, Err(VariantError::MalformedHeader(_))));
    }

    #[rstest]
    fn test_missing_file() {
        let result = VariantSet::try_from("does/not/exist.vcf");
        assert_eq!(result.is_err(), true);
    }
}
