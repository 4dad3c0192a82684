//! Folio - asset URL normalization and link health checks.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use folio::cli::{self, Cli, Commands};
use folio::config::{FolioConfig, init_config};
use folio::links::LinkTracker;
use folio::log;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.apply_output_options();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log!("error"; "{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = init_config(FolioConfig::load(cli)?);

    match &cli.command {
        Commands::Normalize { args } => cli::normalize::run_normalize(args, &config),
        Commands::Check { args } => {
            let tracker = LinkTracker::from_config(&config.links)?;
            runtime()?.block_on(cli::check::run_check(args, &tracker))
        }
        Commands::Scan { args } => {
            let tracker = LinkTracker::from_config(&config.links)?;
            runtime()?.block_on(cli::scan::run_scan(args, &tracker))
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}
