use std::process::ExitStatus;

/// Exit code used for every internal failure. Maps to 255 on Unix and
/// 0xFFFFFFFF on Windows.
pub const FAILURE_EXIT_CODE: i32 = -1;

/// Exit code of a finished process, or [`FAILURE_EXIT_CODE`] when the OS
/// reports none (terminated by a signal).
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(FAILURE_EXIT_CODE)
}
