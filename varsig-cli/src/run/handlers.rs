use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use log::{error, info, warn};

use varsig_core::models::VariantSet;
use varsig_core::utils::get_basename;
use varsig_io::TableWrite;
use varsig_stats::{SignatureExtractor, Summary, annotate, derive_tables};

use crate::config::{CliOverrides, RunFileConfig, Settings, parse_choice};

/// Output file names for one run.
struct OutputPaths {
    full: PathBuf,
    sbs: PathBuf,
    binned: PathBuf,
    summary: PathBuf,
    signatures: PathBuf,
}

impl OutputPaths {
    fn new(output_dir: &Path, name: &str, gzip: bool) -> Self {
        let ext = if gzip { "csv.gz" } else { "csv" };
        OutputPaths {
            full: output_dir.join(format!("{}_tr.{}", name, ext)),
            sbs: output_dir.join(format!("{}_mut_sign_SBS.{}", name, ext)),
            binned: output_dir.join(format!("{}_bins.{}", name, ext)),
            summary: output_dir.join(format!("{}_summary.json", name)),
            signatures: output_dir.join("signatures"),
        }
    }
}

fn write_table<T: TableWrite>(table: &T, path: &Path, gzip: bool) -> Result<()> {
    let written = if gzip {
        table.write_csv_gz(path)
    } else {
        table.write_csv(path)
    };
    written.with_context(|| format!("Failed to write table: {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn choice_arg<T: serde::de::DeserializeOwned>(matches: &ArgMatches, id: &str) -> Result<Option<T>> {
    match matches.get_one::<String>(id) {
        Some(value) => Ok(Some(parse_choice(id, value)?)),
        None => Ok(None),
    }
}

fn cli_overrides(matches: &ArgMatches) -> Result<CliOverrides> {
    Ok(CliOverrides {
        quality: matches.get_one::<f64>("quality").copied(),
        bins: matches.get_one::<u32>("bins").copied(),
        bin_extent: choice_arg(matches, "bin-extent")?,
        out_of_range: choice_arg(matches, "out-of-range")?,
        invalid_sbs: choice_arg(matches, "invalid-sbs")?,
        length_mode: choice_arg(matches, "length-mode")?,
        gzip: matches.get_flag("gzip"),
        signatures_cmd: matches.get_one::<String>("signatures-cmd").cloned(),
    })
}

fn load_settings(matches: &ArgMatches) -> Result<Settings> {
    let file_config = match matches.get_one::<String>("config") {
        Some(p) => RunFileConfig::try_from(Path::new(p))
            .with_context(|| format!("Failed to load config file: {}", p))?,
        None => RunFileConfig::default(),
    };
    Ok(file_config.resolve(cli_overrides(matches)?))
}

pub fn run_pipeline(matches: &ArgMatches) -> Result<()> {
    let vcf_path = PathBuf::from(
        matches
            .get_one::<String>("vcf")
            .context("VCF path is required")?,
    );
    let output_dir = PathBuf::from(
        matches
            .get_one::<String>("output-dir")
            .context("--output-dir has a default")?,
    );
    let name = matches
        .get_one::<String>("name")
        .cloned()
        .unwrap_or_else(|| get_basename(&vcf_path));

    let settings = load_settings(matches)?;
    info!("Run settings: {:?}", settings);

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;
    let paths = OutputPaths::new(&output_dir, &name, settings.gzip);

    // --- full table ---
    let set = VariantSet::try_from(vcf_path.as_path())
        .with_context(|| format!("Failed to load VCF file: {}", vcf_path.display()))?;
    info!("{}: {}", vcf_path.display(), set.header.describe());

    let full = annotate(set, settings.run.length_mode).context("Failed to classify variants")?;
    write_table(&full, &paths.full, settings.gzip)?;

    // --- derived tables, independent of each other ---
    let derived = derive_tables(&full, &settings.run);
    let mut failures: Vec<String> = Vec::new();

    match &derived.sbs {
        Ok(sbs) => {
            if sbs.skipped > 0 {
                warn!("{} records were left out of the SBS table", sbs.skipped);
            }
            if let Err(e) = write_table(sbs, &paths.sbs, settings.gzip) {
                failures.push(format!("SBS table: {:#}", e));
            }
        }
        Err(e) => failures.push(format!("SBS table: {}", e)),
    }
    match &derived.binned {
        Ok(binned) => {
            if let Err(e) = write_table(binned, &paths.binned, settings.gzip) {
                failures.push(format!("binned table: {:#}", e));
            }
        }
        Err(e) => failures.push(format!("binned table: {}", e)),
    }

    // --- summary for the reporting layer ---
    let summary = Summary::build(&full, derived.sbs.as_ref().ok(), derived.binned.as_ref().ok());
    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    let mut file = File::create(&paths.summary)
        .with_context(|| format!("Failed to create output file: {}", paths.summary.display()))?;
    file.write_all(json.as_bytes())?;
    info!("Wrote {}", paths.summary.display());

    // --- external signature extraction ---
    if let Some(extractor) = &settings.signatures {
        let input_dir = vcf_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        if let Err(e) = extractor.extract(input_dir, &paths.signatures) {
            failures.push(format!("signature extraction: {}", e));
        }
    }

    if !failures.is_empty() {
        for failure in &failures {
            error!("{}", failure);
        }
        bail!("{} stage(s) failed: {}", failures.len(), failures.join("; "));
    }

    Ok(())
}
