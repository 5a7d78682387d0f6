use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use varsig_stats::{AnnotatedRecord, BinnedTable, SbsTable, VariantTable};

use crate::error::Result;

const FIXED_HEADER: [&str; 9] = [
    "CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO", "FORMAT",
];
const DERIVED_HEADER: [&str; 5] = ["TYPE", "LENGTH", "HOM_REF_COUNT", "HOM_ALT_COUNT", "HET_COUNT"];

/// Columns shared by every table: original fields, derived fields, sample flags.
fn base_header(sample_columns: &[String]) -> Vec<String> {
    let mut header: Vec<String> = FIXED_HEADER.iter().map(|s| s.to_string()).collect();
    header.extend(sample_columns.iter().cloned());
    header.extend(DERIVED_HEADER.iter().map(|s| s.to_string()));
    header.extend(sample_columns.iter().map(|s| format!("{}_count", s)));
    header
}

fn base_row(variant: &AnnotatedRecord) -> Vec<String> {
    let record = &variant.record;
    let mut row = vec![
        record.chrom.clone(),
        record.pos.to_string(),
        record.id.clone(),
        record.ref_allele.clone(),
        record.alt_allele.clone(),
        record.qual.map(|q| q.to_string()).unwrap_or_default(),
        record.filter.clone(),
        record.info.to_string(),
        record.format.clone(),
    ];
    row.extend(record.genotypes.iter().cloned());
    row.push(variant.variant_type.to_string());
    // no LENGTH is an empty cell, never 0
    row.push(variant.length.map(|l| l.to_string()).unwrap_or_default());
    row.push(variant.counts.hom_ref.to_string());
    row.push(variant.counts.hom_alt.to_string());
    row.push(variant.counts.het.to_string());
    row.extend(variant.sample_flags.iter().map(|f| f.to_string()));
    row
}

fn create_parent(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub trait TableWrite {
    ///
    /// Write the table as CSV to any writer
    ///
    fn write_to<W: Write>(&self, writer: W) -> Result<()>;

    ///
    /// Write data to disk as csv file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_csv<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let path = path.as_ref();
        create_parent(path)?;

        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    ///
    /// Write data to disk as csv.gz file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_csv_gz<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        let path = path.as_ref();
        create_parent(path)?;

        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        self.write_to(&mut encoder)?;
        encoder.finish()?;
        Ok(())
    }
}

impl TableWrite for VariantTable {
    fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(base_header(&self.sample_columns))?;
        for variant in &self.records {
            csv_writer.write_record(base_row(variant))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl TableWrite for SbsTable<'_> {
    fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = base_header(self.sample_columns);
        header.push("MUTATION_SIGN".to_string());
        csv_writer.write_record(header)?;

        for sbs in &self.records {
            let mut row = base_row(sbs.variant);
            row.push(sbs.mutation_sign.to_string());
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl TableWrite for BinnedTable<'_> {
    fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = base_header(self.sample_columns);
        header.push("BIN".to_string());
        csv_writer.write_record(header)?;

        for binned in &self.records {
            let mut row = base_row(binned.variant);
            row.push(binned.bin.to_string());
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use std::io::Read;
    use std::path::PathBuf;

    use flate2::read::MultiGzDecoder;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use varsig_core::models::VariantSet;
    use varsig_stats::{LengthMode, RunConfig, annotate, derive_tables};

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/vcf")
            .join(file_name)
    }

    #[fixture]
    fn table() -> VariantTable {
        let set = VariantSet::try_from(get_test_path("small.vcf")).unwrap();
        annotate(set, LengthMode::Allele).unwrap()
    }

    fn to_lines(table: &impl TableWrite) -> Vec<String> {
        let mut buf = Vec::new();
        table.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap().lines().map(String::from).collect()
    }

    #[rstest]
    fn test_full_table_layout(table: VariantTable) {
        let lines = to_lines(&table);

        assert_eq!(lines.len(), table.len() + 1);
        assert_eq!(
            lines[0],
            "CHROM,POS,ID,REF,ALT,QUAL,FILTER,INFO,FORMAT,sample1,sample2,sample3,\
             TYPE,LENGTH,HOM_REF_COUNT,HOM_ALT_COUNT,HET_COUNT,\
             sample1_count,sample2_count,sample3_count"
        );
        assert_eq!(
            lines[1],
            "chr1,100,rs1,G,A,50,PASS,DP=10;VT=SNP,GT,0|0,0|1,1|1,SNP,,1,1,1,0,1,1"
        );
        // multi-allelic ALT is quoted
        assert_eq!(
            lines[5],
            "chr1,800,.,A,\"C,G\",45,PASS,DP=8;VT=SNP,GT,0|1,0|0,0|0,MUL_ALT,,2,0,1,1,0,0"
        );
    }

    #[rstest]
    fn test_derived_table_columns(table: VariantTable) {
        let derived = derive_tables(&table, &RunConfig::default());

        let sbs_lines = to_lines(derived.sbs.as_ref().unwrap());
        assert_eq!(sbs_lines.len(), 4);
        assert_eq!(sbs_lines[0].ends_with(",MUTATION_SIGN"), true);
        assert_eq!(sbs_lines[1].ends_with(",C>T"), true);

        let bin_lines = to_lines(derived.binned.as_ref().unwrap());
        assert_eq!(bin_lines.len(), table.len() + 1);
        assert_eq!(bin_lines[0].ends_with(",BIN"), true);
        // 20 bins over [0, 900]: POS 100 falls in the third
        assert_eq!(bin_lines[1].ends_with(",Bin3"), true);
    }

    #[rstest]
    fn test_save_csv_and_csv_gz(table: VariantTable) {
        let tempdir = tempfile::tempdir().unwrap();

        let plain = tempdir.path().join("nested/out_tr.csv");
        assert!(table.write_csv(&plain).is_ok());

        let gz = tempdir.path().join("out_tr.csv.gz");
        assert!(table.write_csv_gz(&gz).is_ok());

        let plain_text = std::fs::read_to_string(&plain).unwrap();
        let mut gz_text = String::new();
        MultiGzDecoder::new(File::open(&gz).unwrap())
            .read_to_string(&mut gz_text)
            .unwrap();

        assert_eq!(plain_text, gz_text);
    }
}
