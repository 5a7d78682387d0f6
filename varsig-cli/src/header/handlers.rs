use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;
use serde::Serialize;

use varsig_core::models::VcfHeader;
use varsig_core::utils::get_dynamic_reader_w_stdin;

#[derive(Serialize)]
struct HeaderOutput<'a> {
    sample_count: usize,
    contig_count: usize,
    #[serde(flatten)]
    header: &'a VcfHeader,
}

pub fn read_header(vcf: &str) -> Result<VcfHeader> {
    let reader = get_dynamic_reader_w_stdin(vcf)?;
    VcfHeader::from_reader(reader).with_context(|| format!("Failed to read VCF header: {}", vcf))
}

pub fn run_header(matches: &ArgMatches) -> Result<()> {
    let vcf = matches
        .get_one::<String>("vcf")
        .context("VCF path is required")?;
    let output_path = matches.get_one::<String>("output");

    let header = read_header(vcf)?;
    let output = HeaderOutput {
        sample_count: header.sample_count(),
        contig_count: header.contigs.len(),
        header: &header,
    };

    let json =
        serde_json::to_string_pretty(&output).context("Failed to serialize header to JSON")?;

    match output_path {
        Some(p) => {
            let mut file = File::create(Path::new(p))
                .with_context(|| format!("Failed to create output file: {}", p))?;
            file.write_all(json.as_bytes())?;
            info!("Header written to {}", p);
        }
        None => {
            io::stdout().write_all(json.as_bytes())?;
            println!();
        }
    }

    Ok(())
}
