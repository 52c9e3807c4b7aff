//! Flame chart command-line tool
//!
//! Loads trace-event profiles, summarises them and renders flame charts to SVG.

use std::process::ExitCode;
use clap::Parser;

mod args;
mod commands;
mod consts;
mod logging;

use args::Cli;
use consts::{APP_DESCRIPTION, APP_NAME, APP_VERSION};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose);
    tracing::debug!("{} v{}: {}", APP_NAME, APP_VERSION, APP_DESCRIPTION);

    let stdout = std::io::stdout();
    match commands::run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
