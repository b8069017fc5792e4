use std::time::SystemTime;

use ctrlc_wrapper_models::errors::SendableError;
use log::LevelFilter;

/// Environment variable both binaries read their log level from.
pub const LOG_ENV: &str = "CTRLC_WRAPPER_LOG";

/// Routes every record to stderr, one line each. Stdout is reserved for
/// whatever the managed child prints.
pub fn setup_logger(level: LevelFilter) -> Result<(), SendableError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

pub fn parse_level(raw: &str) -> Result<LevelFilter, SendableError> {
    raw.parse::<LevelFilter>()
        .map_err(|_| format!("Unknown log level '{}'", raw).into())
}
