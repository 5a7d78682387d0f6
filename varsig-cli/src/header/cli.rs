use clap::{Arg, Command, arg};

pub const HEADER_CMD: &str = "header";

pub fn create_header_cli() -> Command {
    Command::new(HEADER_CMD)
        .about("Report the samples, contigs, FILTER and INFO ids declared in a VCF header.")
        .arg(Arg::new("vcf").required(true).help("Input VCF file (.vcf or .vcf.gz), or - for stdin"))
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output JSON path (default: stdout)"),
        )
}
