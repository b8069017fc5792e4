mod child;
mod cli;
mod config;
mod locator;
mod os;
mod relay;
mod supervisor;
mod terminate;

use std::process;

use clap::Parser;
use ctrlc_wrapper_models::exit::FAILURE_EXIT_CODE;
use ctrlc_wrapper_utilities::startup;

use crate::{cli::Cli, config::SupervisorConfig};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures
            if !err.use_stderr() {
                err.exit();
            }
            let _ = err.print();
            process::exit(FAILURE_EXIT_CODE);
        }
    };

    let config = match SupervisorConfig::from_cli(cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(FAILURE_EXIT_CODE);
        }
    };

    if let Err(err) = startup::startup("start", config.log_level) {
        eprintln!("Failed to set up logging: {}", err);
        process::exit(FAILURE_EXIT_CODE);
    }

    // relay tasks still blocked on stdin are abandoned here
    process::exit(supervisor::run(config).await);
}
