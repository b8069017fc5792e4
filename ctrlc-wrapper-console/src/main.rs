use std::{env, process};

use clap::Parser;
use ctrlc_wrapper_console::{cli::Cli, send_ctrl_c, system_console};
use ctrlc_wrapper_utilities::{logger, startup};
use log::{LevelFilter, error};

fn main() {
    // usage errors exit here, before any console call
    let cli = Cli::parse();

    let level = match env::var(logger::LOG_ENV).map_or(Ok(LevelFilter::Warn), |raw| {
        logger::parse_level(&raw)
    }) {
        Ok(level) => level,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    if let Err(err) = startup::startup("ctrlc", level) {
        eprintln!("Failed to set up logging: {}", err);
        process::exit(1);
    }

    let mut console = system_console();
    if let Err(err) = send_ctrl_c(&mut console, cli.pid) {
        error!("Failed to send CTRL+C signal: {}", err);
        process::exit(1);
    }
}
