use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = matches!(
        path.extension().and_then(OsStr::to_str),
        Some("gz") | Some("bgz")
    );
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(Path::new(file_path_str))
    }
}

///
/// Positional sample column names `sample1..sampleN`
///
pub fn sample_columns(n_samples: usize) -> Vec<String> {
    (1..=n_samples).map(|i| format!("sample{}", i)).collect()
}

///
/// File name up to its first `.`, used as the default output prefix.
///
/// `data/cohort.chr1.vcf.gz` gives `cohort`.
pub fn get_basename(path: &Path) -> String {
    path.file_name()
        .and_then(OsStr::to_str)
        .map(|name| name.split('.').next().unwrap_or(name).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_sample_columns() {
        assert_eq!(sample_columns(3), vec!["sample1", "sample2", "sample3"]);
        assert_eq!(sample_columns(0).is_empty(), true);
    }

    #[rstest]
    #[case("data/cohort.chr1.vcf.gz", "cohort")]
    #[case("cohort.vcf", "cohort")]
    #[case("/abs/path/no_extension", "no_extension")]
    fn test_get_basename(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(get_basename(Path::new(path)), expected);
    }

    #[rstest]
    fn test_gzipped_reader() {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.vcf.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        writeln!(encoder, "#CHROM").unwrap();
        encoder.finish().unwrap();

        let lines: Vec<String> = get_dynamic_reader(&path)
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["#CHROM".to_string()]);
    }
}
