mod app;
mod cli;
mod config;
mod logging;
mod render;

use std::process::ExitCode;

use clap::Parser;
use wordfreq_logging::wordfreq_debug;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(cli.log_destination(), cli.log_level());

    match app::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            wordfreq_debug!("run failed: {err:?}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
