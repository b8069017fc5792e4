use ctrlc_wrapper_models::errors::SendableError;
use log::{debug, LevelFilter};

use crate::logger;

pub fn startup(name: &str, level: LevelFilter) -> Result<(), SendableError> {
    logger::setup_logger(level)?;
    log_panics::init();

    debug!("--- {} (pid {}) ---", name, std::process::id());
    Ok(())
}
