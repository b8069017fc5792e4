use std::{io, path::PathBuf, process::Stdio, time::Duration};

use log::{debug, info, warn};
use thiserror::Error;
use tokio::time;

use crate::{child::ChildHandle, locator};

#[derive(Debug, Error)]
pub enum TerminateError {
    #[error("Failed to locate signal sender: {0}")]
    SenderLocation(#[source] io::Error),
    #[error("Failed to start {program}: {source}")]
    SenderSpawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Timeout reached waiting for PID {pid} to exit")]
    Timeout { pid: u32 },
}

/// Asks a process to interrupt itself. Implementations must not wait for
/// the process to react.
pub trait InterruptSender {
    fn send_interrupt(&self, pid: u32) -> Result<(), TerminateError>;
}

/// Runs the `ctrlc` binary against the child and moves on. Its exit status
/// is only logged.
pub struct SenderProcess {
    explicit: Option<PathBuf>,
}

impl SenderProcess {
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

impl InterruptSender for SenderProcess {
    fn send_interrupt(&self, pid: u32) -> Result<(), TerminateError> {
        let sender = locator::resolve(self.explicit.as_deref()).map_err(TerminateError::SenderLocation)?;
        let program = sender.program().to_string_lossy().into_owned();

        let mut command = sender.command(pid);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());
        let mut process = command
            .spawn()
            .map_err(|source| TerminateError::SenderSpawn {
                program: program.clone(),
                source,
            })?;
        debug!("Started {} for PID {}", program, pid);

        tokio::spawn(async move {
            match process.wait().await {
                Ok(status) if status.success() => debug!("{} finished", program),
                Ok(status) => warn!("{} exited with {}", program, status),
                Err(err) => warn!("Failed to wait for {}: {}", program, err),
            }
        });
        Ok(())
    }
}

/// Stops a child: CTRL+C first, a kill if that is ignored.
pub struct Termination<S> {
    sender: S,
    interrupt_timeout: Duration,
    kill_timeout: Duration,
}

impl<S: InterruptSender> Termination<S> {
    pub fn new(sender: S, interrupt_timeout: Duration, kill_timeout: Duration) -> Self {
        Self {
            sender,
            interrupt_timeout,
            kill_timeout,
        }
    }

    #[cfg(test)]
    pub(crate) fn sender(&self) -> &S {
        &self.sender
    }

    /// Returns the child's exit code. A child that already exited is not
    /// touched again.
    pub async fn terminate(&self, child: &mut ChildHandle) -> Result<i32, TerminateError> {
        if let Some(code) = child.exit_code() {
            return Ok(code);
        }

        let pid = child.pid();
        info!("Sending CTRL+C to PID {}", pid);
        self.sender.send_interrupt(pid)?;

        if let Ok(code) = time::timeout(self.interrupt_timeout, child.exited()).await {
            return Ok(code);
        }

        warn!(
            "PID {} still running {:?} after CTRL+C, killing it",
            pid, self.interrupt_timeout
        );
        child.kill();

        match time::timeout(self.kill_timeout, child.exited()).await {
            Ok(code) => Ok(code),
            Err(_) => Err(TerminateError::Timeout { pid }),
        }
    }
}
