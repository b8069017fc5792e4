use std::{
    ffi::{OsStr, OsString},
    process::{Command as StdCommand, Stdio},
    time::Duration,
};

use ctrlc_wrapper_models::{
    errors::{RuntimeError, SendableError},
    exit::{FAILURE_EXIT_CODE, exit_code},
};
use log::{debug, error, info, warn};
use tokio::{
    io::AsyncBufRead,
    process::{Child, Command},
    sync::{oneshot, watch},
    task::JoinHandle,
    time,
};

use crate::{os, relay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildState {
    Starting,
    Running,
    Exited(i32),
}

impl ChildState {
    pub fn exit_code(self) -> Option<i32> {
        match self {
            ChildState::Exited(code) => Some(code),
            _ => None,
        }
    }
}

/// Supervisor-side view of the child. The OS process itself is owned by the
/// exit watcher task; this handle observes its state and can ask it to kill.
#[derive(Debug)]
pub struct ChildHandle {
    pid: u32,
    state: watch::Receiver<ChildState>,
    kill: Option<oneshot::Sender<()>>,
}

impl ChildHandle {
    pub(crate) fn new(
        pid: u32,
        state: watch::Receiver<ChildState>,
        kill: oneshot::Sender<()>,
    ) -> Self {
        Self {
            pid,
            state,
            kill: Some(kill),
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Exit code, if the child has already been seen exiting.
    pub fn exit_code(&self) -> Option<i32> {
        self.state.borrow().exit_code()
    }

    /// Resolves once the child has exited.
    pub async fn exited(&mut self) -> i32 {
        match self.state.wait_for(|state| state.exit_code().is_some()).await {
            Ok(state) => state.exit_code().unwrap_or(FAILURE_EXIT_CODE),
            Err(_) => {
                error!("Exit watcher for PID {} went away", self.pid);
                FAILURE_EXIT_CODE
            }
        }
    }

    /// Asks the exit watcher to kill the child. Only the first request is
    /// delivered; returns whether this call delivered it.
    pub fn kill(&mut self) -> bool {
        match self.kill.take() {
            Some(kill) => kill.send(()).is_ok(),
            None => false,
        }
    }
}

pub struct LaunchedChild {
    pub handle: ChildHandle,
    /// Fires once when `^C` is read from the input.
    pub sentinel: oneshot::Receiver<()>,
    outputs: Vec<JoinHandle<()>>,
}

impl LaunchedChild {
    /// Gives the output relays up to `timeout` to copy what the child wrote
    /// before it exited.
    pub async fn drain_output(&mut self, timeout: Duration) {
        for relay in self.outputs.drain(..) {
            if time::timeout(timeout, relay).await.is_err() {
                debug!("Output relay still open after {:?}", timeout);
            }
        }
    }
}

/// Starts `program` in its own console/process group with every stdio
/// stream relayed through the supervisor.
pub fn launch<R>(program: &OsStr, args: &[OsString], input: R) -> Result<LaunchedChild, SendableError>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (state_tx, state_rx) = watch::channel(ChildState::Starting);

    let mut command = StdCommand::new(program);
    command
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    os::isolate(&mut command);
    let mut command = Command::from(command);

    let mut child = command.spawn().map_err(|err| -> SendableError {
        Box::new(RuntimeError::new(
            "supervisor.spawn".into(),
            format!("Failed to start '{}': {}", program.to_string_lossy(), err),
        ))
    })?;

    let pid = child.id().ok_or_else(|| pipe_error("pid"))?;
    let stdin = child.stdin.take().ok_or_else(|| pipe_error("stdin"))?;
    let stdout = child.stdout.take().ok_or_else(|| pipe_error("stdout"))?;
    let stderr = child.stderr.take().ok_or_else(|| pipe_error("stderr"))?;
    info!("Started child PID {}", pid);

    let outputs = vec![
        tokio::spawn(async move {
            if let Err(err) = relay::forward_output(stdout, tokio::io::stdout()).await {
                debug!("stdout relay stopped: {}", err);
            }
        }),
        tokio::spawn(async move {
            if let Err(err) = relay::forward_output(stderr, tokio::io::stderr()).await {
                debug!("stderr relay stopped: {}", err);
            }
        }),
    ];

    state_tx.send_replace(ChildState::Running);

    let (sentinel_tx, sentinel_rx) = oneshot::channel();
    let mut input_state = state_rx.clone();
    tokio::spawn(async move {
        let mut stdin = stdin;
        match relay::forward_input(input, &mut stdin, &input_state, sentinel_tx).await {
            Ok(outcome) => debug!("stdin relay finished: {:?}", outcome),
            Err(err) => warn!("stdin relay failed: {}", err),
        }
        // the child's stdin stays open until it exits
        let _ = input_state.wait_for(|state| state.exit_code().is_some()).await;
    });

    let (kill_tx, kill_rx) = oneshot::channel();
    tokio::spawn(watch_exit(child, kill_rx, state_tx));

    Ok(LaunchedChild {
        handle: ChildHandle::new(pid, state_rx, kill_tx),
        sentinel: sentinel_rx,
        outputs,
    })
}

async fn watch_exit(
    mut child: Child,
    mut kill: oneshot::Receiver<()>,
    state: watch::Sender<ChildState>,
) {
    let exited = tokio::select! {
        status = child.wait() => Some(status),
        Ok(()) = &mut kill => None,
    };

    let status = match exited {
        Some(status) => status,
        None => {
            warn!("Killing child PID {:?}", child.id());
            if let Err(err) = child.start_kill() {
                error!("Failed to kill child: {}", err);
            }
            child.wait().await
        }
    };

    let code = match status {
        Ok(status) => exit_code(status),
        Err(err) => {
            error!("Failed to wait for child: {}", err);
            FAILURE_EXIT_CODE
        }
    };
    info!("Child exited with code {}", code);
    state.send_replace(ChildState::Exited(code));
}

fn pipe_error(stream: &str) -> SendableError {
    Box::new(RuntimeError::new(
        "supervisor.pipe".into(),
        format!("Failed to capture child {}", stream),
    ))
}
