mod config;
mod header;
mod run;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "varsig";
    pub const BIN_NAME: &str = "varsig";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Classify VCF variants, compute genotype statistics and single base substitution signatures.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
        .subcommand(run::cli::create_run_cli())
        .subcommand(header::cli::create_header_cli())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_count("verbose"));
    log::debug!("{} {}", consts::PKG_NAME, consts::VERSION);

    match matches.subcommand() {
        //
        // RUN
        //
        Some((run::cli::RUN_CMD, matches)) => {
            run::handlers::run_pipeline(matches)?;
        }

        //
        // HEADER
        //
        Some((header::cli::HEADER_CMD, matches)) => {
            header::handlers::run_header(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
