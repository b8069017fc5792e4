use std::io;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachTarget {
    Process(u32),
    /// Console of the parent process (`ATTACH_PARENT_PROCESS`).
    Parent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    CtrlC,
    CtrlBreak,
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("{operation}: {source}")]
    Call {
        operation: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{operation}: console control is not supported on this platform")]
    Unsupported { operation: &'static str },
}

impl ConsoleError {
    /// Wraps the calling thread's last OS error.
    pub fn last_os_error(operation: &'static str) -> Self {
        ConsoleError::Call {
            operation,
            source: io::Error::last_os_error(),
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            ConsoleError::Call { operation, .. } => *operation,
            ConsoleError::Unsupported { operation } => *operation,
        }
    }
}

/// Console primitives the sender needs. A process is attached to at most
/// one console at a time.
pub trait Console {
    fn detach(&mut self) -> Result<(), ConsoleError>;

    fn attach(&mut self, target: AttachTarget) -> Result<(), ConsoleError>;

    /// Stops the calling process from reacting to CTRL+C.
    fn ignore_ctrl_c(&mut self) -> Result<(), ConsoleError>;

    /// Raises `event` for every process attached to the current console.
    fn broadcast(&mut self, event: ControlEvent) -> Result<(), ConsoleError>;
}
