use std::{io, process::Command};

/// Gives the child its own console so CTRL+C raised there never reaches
/// the supervisor.
#[cfg(windows)]
pub fn isolate(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    use winapi::um::winbase::CREATE_NEW_CONSOLE;

    command.creation_flags(CREATE_NEW_CONSOLE);
}

/// Puts the child in its own process group so terminal signals aimed at the
/// supervisor never reach it.
#[cfg(unix)]
pub fn isolate(command: &mut Command) {
    use std::os::unix::process::CommandExt;

    command.process_group(0);
}

/// CTRL+C / SIGINT delivered to the supervisor. The OS handler is installed
/// by [`Interrupts::listen`], not on first poll.
pub struct Interrupts {
    #[cfg(unix)]
    inner: tokio::signal::unix::Signal,
    #[cfg(windows)]
    inner: tokio::signal::windows::CtrlC,
}

impl Interrupts {
    #[cfg(unix)]
    pub fn listen() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Interrupts {
            inner: signal(SignalKind::interrupt())?,
        })
    }

    #[cfg(windows)]
    pub fn listen() -> io::Result<Self> {
        Ok(Interrupts {
            inner: tokio::signal::windows::ctrl_c()?,
        })
    }

    pub async fn recv(&mut self) -> io::Result<()> {
        match self.inner.recv().await {
            Some(()) => Ok(()),
            None => Err(io::Error::other("interrupt stream closed")),
        }
    }
}
