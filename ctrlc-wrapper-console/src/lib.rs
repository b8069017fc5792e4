//! Delivers CTRL+C to the console process group of another process.
//!
//! Windows only signals processes attached to the caller's own console, so
//! the sender leaves its console, joins the target's, stops reacting to
//! CTRL+C itself and then raises the event for the whole group.

pub mod cli;
mod console;
mod other;
mod sender;
mod windows;

pub use console::{AttachTarget, Console, ConsoleError, ControlEvent};
pub use sender::{cleanup, send_ctrl_c};

/// Console of the running process, backed by the OS.
#[cfg(target_os = "windows")]
pub fn system_console() -> impl Console {
    windows::WinConsole
}

/// Console of the running process, backed by the OS.
#[cfg(not(target_os = "windows"))]
pub fn system_console() -> impl Console {
    other::UnsupportedConsole
}
