use std::{future::Future, io, time::Duration};

use ctrlc_wrapper_models::exit::FAILURE_EXIT_CODE;
use log::{error, info, warn};
use tokio::{io::BufReader, sync::oneshot};

use crate::{
    child::{self, ChildHandle},
    config::SupervisorConfig,
    os::Interrupts,
    terminate::{InterruptSender, SenderProcess, Termination},
};

/// How long output relays may keep copying once the outcome is known.
const OUTPUT_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, PartialEq, Eq)]
pub enum Trigger {
    /// The supervisor itself received CTRL+C / SIGINT.
    Interrupt,
    /// `^C` was read from stdin.
    Sentinel,
    Exited(i32),
}

/// Launches the child and returns the code the supervisor should exit with.
pub async fn run(config: SupervisorConfig) -> i32 {
    let interrupts = match Interrupts::listen() {
        Ok(interrupts) => Some(interrupts),
        Err(err) => {
            warn!("Unable to listen for CTRL+C: {}", err);
            None
        }
    };

    let input = BufReader::new(tokio::io::stdin());
    let mut launched = match child::launch(&config.program, &config.args, input) {
        Ok(launched) => launched,
        Err(err) => {
            error!("Failed to start child: {}", err);
            return FAILURE_EXIT_CODE;
        }
    };

    let termination = Termination::new(
        SenderProcess::new(config.ctrlc_path.clone()),
        config.interrupt_timeout,
        config.kill_timeout,
    );

    let trigger = wait_for_trigger(
        next_interrupt(interrupts),
        &mut launched.sentinel,
        &mut launched.handle,
    )
    .await;
    let code = resolve_trigger(trigger, &termination, &mut launched.handle).await;

    launched.drain_output(OUTPUT_DRAIN_TIMEOUT).await;
    code
}

async fn next_interrupt(interrupts: Option<Interrupts>) -> io::Result<()> {
    match interrupts {
        Some(mut interrupts) => interrupts.recv().await,
        None => Err(io::Error::other("no interrupt listener")),
    }
}

/// Waits for whichever comes first: an interrupt, the sentinel, or the child
/// exiting. A failed interrupt listener or a closed sentinel channel only
/// removes that source.
pub async fn wait_for_trigger<F>(
    interrupt: F,
    sentinel: &mut oneshot::Receiver<()>,
    child: &mut ChildHandle,
) -> Trigger
where
    F: Future<Output = io::Result<()>>,
{
    tokio::select! {
        Ok(()) = interrupt => Trigger::Interrupt,
        Ok(()) = sentinel => Trigger::Sentinel,
        code = child.exited() => Trigger::Exited(code),
    }
}

pub async fn resolve_trigger<S: InterruptSender>(
    trigger: Trigger,
    termination: &Termination<S>,
    child: &mut ChildHandle,
) -> i32 {
    match trigger {
        Trigger::Exited(code) => code,
        Trigger::Interrupt | Trigger::Sentinel => {
            info!("{:?} received, terminating PID {}", trigger, child.pid());
            match termination.terminate(child).await {
                Ok(code) => code,
                Err(err) => {
                    error!("Failed to terminate child: {}", err);
                    FAILURE_EXIT_CODE
                }
            }
        }
    }
}
