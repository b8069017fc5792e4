use std::{ffi::OsString, path::PathBuf, time::Duration};

use ctrlc_wrapper_models::errors::{RuntimeError, SendableError};
use ctrlc_wrapper_utilities::logger;
use log::LevelFilter;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub interrupt_timeout: Duration,
    pub kill_timeout: Duration,
    pub ctrlc_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl SupervisorConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, SendableError> {
        let mut command = cli.command.into_iter();
        let program = command.next().ok_or_else(|| -> SendableError {
            Box::new(RuntimeError::new(
                "supervisor.usage".into(),
                "Missing arguments".into(),
            ))
        })?;

        Ok(SupervisorConfig {
            program,
            args: command.collect(),
            interrupt_timeout: Duration::from_secs(cli.interrupt_timeout_secs),
            kill_timeout: Duration::from_secs(cli.kill_timeout_secs),
            ctrlc_path: cli.ctrlc_path,
            log_level: logger::parse_level(&cli.log_level)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn splits_program_from_arguments() {
        let cli = Cli::try_parse_from(["start", "cmd", "/C", "exit", "7"]).unwrap();
        let config = SupervisorConfig::from_cli(cli).unwrap();

        assert_eq!(config.program, OsString::from("cmd"));
        assert_eq!(config.args, vec![OsString::from("/C"), "exit".into(), "7".into()]);
        assert_eq!(config.interrupt_timeout, Duration::from_secs(10));
        assert_eq!(config.kill_timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert!(config.ctrlc_path.is_none());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let cli = Cli::try_parse_from(["start", "--log-level", "chatty", "cmd"]).unwrap();
        assert!(SupervisorConfig::from_cli(cli).is_err());
    }
}
