use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "start",
    version,
    about = "Run a command in its own console and stop it with CTRL+C on request",
    after_help = "A line consisting of exactly ^C on stdin terminates the child."
)]
pub struct Cli {
    /// Seconds to wait for the child after sending CTRL+C before killing it.
    #[arg(long, env = "CTRLC_WRAPPER_INTERRUPT_TIMEOUT_SECS", default_value_t = 10)]
    pub interrupt_timeout_secs: u64,

    /// Seconds to wait for the child after killing it.
    #[arg(long, env = "CTRLC_WRAPPER_KILL_TIMEOUT_SECS", default_value_t = 5)]
    pub kill_timeout_secs: u64,

    /// Signal sender to run instead of the `ctrlc` binary next to this one.
    #[arg(long, env = "CTRLC_WRAPPER_CTRLC_PATH")]
    pub ctrlc_path: Option<PathBuf>,

    /// Log level for diagnostics written to stderr.
    #[arg(long, env = "CTRLC_WRAPPER_LOG", default_value = "warn")]
    pub log_level: String,

    /// Child executable followed by its arguments, passed through untouched.
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}
