use clap::{Arg, ArgAction, Command, arg};

pub const RUN_CMD: &str = "run";

pub fn create_run_cli() -> Command {
    Command::new(RUN_CMD)
        .about("Classify variants, compute genotype statistics and SBS signatures, and bin variants along each chromosome.")
        .arg(Arg::new("vcf").required(true).help("Input VCF file (.vcf or .vcf.gz)"))
        .arg(
            arg!(-o --"output-dir" <DIR>)
                .required(false)
                .default_value("outputs")
                .help("Output directory, created if missing"),
        )
        .arg(
            arg!(-n --name <NAME>)
                .required(false)
                .help("Prefix for output files (default: input basename)"),
        )
        .arg(
            arg!(-q --quality <QUAL>)
                .required(false)
                .value_parser(clap::value_parser!(f64))
                .help("Keep SNPs with QUAL above this threshold instead of FILTER == PASS"),
        )
        .arg(
            arg!(--bins <BINS>)
                .required(false)
                .value_parser(clap::value_parser!(u32))
                .help("Number of positional bins per chromosome [default: 20]"),
        )
        .arg(
            Arg::new("bin-extent")
                .long("bin-extent")
                .required(false)
                .value_parser(["last-record", "chromosome-max"])
                .help("Upper edge of the binned range"),
        )
        .arg(
            Arg::new("out-of-range")
                .long("out-of-range")
                .required(false)
                .value_parser(["clamp", "reject"])
                .help("What to do with positions past the binned range"),
        )
        .arg(
            Arg::new("invalid-sbs")
                .long("invalid-sbs")
                .required(false)
                .value_parser(["fail", "skip"])
                .help("What to do with selected SNPs that are not single base substitutions"),
        )
        .arg(
            Arg::new("length-mode")
                .long("length-mode")
                .required(false)
                .value_parser(["allele", "net"])
                .help("INDEL LENGTH as allele length or as net length change"),
        )
        .arg(
            arg!(--gzip)
                .action(ArgAction::SetTrue)
                .help("Write gzipped CSV tables"),
        )
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .help("Path to a TOML run configuration"),
        )
        .arg(
            Arg::new("signatures-cmd")
                .long("signatures-cmd")
                .required(false)
                .help("External signature extraction program, run on the input directory"),
        )
}
