use clap::Parser;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Expected a PID as argument, got '{0}'")]
    InvalidPid(String),
}

#[derive(Debug, Parser)]
#[command(
    name = "ctrlc",
    about = "Send CTRL+C to the console process group of a process",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// PID of the process whose console receives the event.
    #[arg(value_parser = parse_pid)]
    pub pid: u32,
}

/// Accepts base-10 digits only; signs and whitespace are rejected.
pub fn parse_pid(raw: &str) -> Result<u32, UsageError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UsageError::InvalidPid(raw.to_string()));
    }
    raw.parse::<u32>()
        .map_err(|_| UsageError::InvalidPid(raw.to_string()))
}
