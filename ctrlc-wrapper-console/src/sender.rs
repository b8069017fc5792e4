use log::debug;

use crate::console::{AttachTarget, Console, ConsoleError, ControlEvent};

/// Sends CTRL+C to the console group of `pid`.
///
/// Stops at the first failing step. On failure the caller is moved back to
/// its parent console so the error can still be reported there.
pub fn send_ctrl_c<C: Console>(console: &mut C, pid: u32) -> Result<(), ConsoleError> {
    match run_sequence(console, pid) {
        Ok(()) => Ok(()),
        Err(err) => {
            cleanup(console);
            Err(err)
        }
    }
}

fn run_sequence<C: Console>(console: &mut C, pid: u32) -> Result<(), ConsoleError> {
    // logged while still attached to our own console
    debug!("Sending CTRL+C to console of PID {}", pid);
    console.detach()?;
    console.attach(AttachTarget::Process(pid))?;
    console.ignore_ctrl_c()?;
    console.broadcast(ControlEvent::CtrlC)
}

/// Best-effort return to the parent console. Failures are ignored.
pub fn cleanup<C: Console>(console: &mut C) {
    if let Err(err) = console.detach() {
        debug!("Cleanup detach failed: {}", err);
        return;
    }
    if let Err(err) = console.attach(AttachTarget::Parent) {
        debug!("Cleanup attach to parent console failed: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Detach,
        Attach(AttachTarget),
        IgnoreCtrlC,
        Broadcast(ControlEvent),
    }

    #[derive(Default)]
    struct RecordingConsole {
        calls: Vec<Call>,
        fail_on: Vec<Call>,
    }

    impl RecordingConsole {
        fn failing(fail_on: &[Call]) -> Self {
            Self {
                calls: Vec::new(),
                fail_on: fail_on.to_vec(),
            }
        }

        fn record(&mut self, call: Call, operation: &'static str) -> Result<(), ConsoleError> {
            self.calls.push(call);
            if self.fail_on.contains(&call) {
                Err(ConsoleError::Call {
                    operation,
                    source: io::Error::from_raw_os_error(6),
                })
            } else {
                Ok(())
            }
        }
    }

    impl Console for RecordingConsole {
        fn detach(&mut self) -> Result<(), ConsoleError> {
            self.record(Call::Detach, "FreeConsole")
        }

        fn attach(&mut self, target: AttachTarget) -> Result<(), ConsoleError> {
            self.record(Call::Attach(target), "AttachConsole")
        }

        fn ignore_ctrl_c(&mut self) -> Result<(), ConsoleError> {
            self.record(Call::IgnoreCtrlC, "SetConsoleCtrlHandler")
        }

        fn broadcast(&mut self, event: ControlEvent) -> Result<(), ConsoleError> {
            self.record(Call::Broadcast(event), "GenerateConsoleCtrlEvent")
        }
    }

    #[test]
    fn runs_steps_in_order() {
        let mut console = RecordingConsole::default();
        send_ctrl_c(&mut console, 4242).unwrap();
        assert_eq!(
            console.calls,
            vec![
                Call::Detach,
                Call::Attach(AttachTarget::Process(4242)),
                Call::IgnoreCtrlC,
                Call::Broadcast(ControlEvent::CtrlC),
            ]
        );
    }

    #[test]
    fn attach_failure_stops_sequence_and_returns_to_parent() {
        let mut console = RecordingConsole::failing(&[Call::Attach(AttachTarget::Process(7))]);
        let err = send_ctrl_c(&mut console, 7).unwrap_err();

        assert_eq!(err.operation(), "AttachConsole");
        assert_eq!(
            console.calls,
            vec![
                Call::Detach,
                Call::Attach(AttachTarget::Process(7)),
                Call::Detach,
                Call::Attach(AttachTarget::Parent),
            ]
        );
    }

    #[test]
    fn detach_failure_reports_free_console() {
        let mut console = RecordingConsole::failing(&[Call::Detach]);
        let err = send_ctrl_c(&mut console, 7).unwrap_err();

        assert_eq!(err.operation(), "FreeConsole");
        // the cleanup detach fails too, so the parent console is never tried
        assert_eq!(console.calls, vec![Call::Detach, Call::Detach]);
    }

    #[test]
    fn broadcast_failure_is_not_masked_by_cleanup_failure() {
        let mut console = RecordingConsole::failing(&[
            Call::Broadcast(ControlEvent::CtrlC),
            Call::Attach(AttachTarget::Parent),
        ]);
        let err = send_ctrl_c(&mut console, 11).unwrap_err();

        assert_eq!(err.operation(), "GenerateConsoleCtrlEvent");
        assert!(err.to_string().starts_with("GenerateConsoleCtrlEvent: "));
        assert_eq!(console.calls.last(), Some(&Call::Attach(AttachTarget::Parent)));
    }

    #[test]
    fn handler_failure_skips_broadcast() {
        let mut console = RecordingConsole::failing(&[Call::IgnoreCtrlC]);
        let err = send_ctrl_c(&mut console, 3).unwrap_err();

        assert_eq!(err.operation(), "SetConsoleCtrlHandler");
        assert!(!console
            .calls
            .iter()
            .any(|call| matches!(call, Call::Broadcast(_))));
    }

    #[test]
    fn target_is_attached_exactly_once() {
        let mut console = RecordingConsole::failing(&[Call::Broadcast(ControlEvent::CtrlC)]);
        let _ = send_ctrl_c(&mut console, 99);

        let first_detach = console.calls.iter().position(|c| *c == Call::Detach);
        let target_attaches: Vec<usize> = console
            .calls
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Call::Attach(AttachTarget::Process(99)))
            .map(|(i, _)| i)
            .collect();

        assert_eq!(target_attaches.len(), 1);
        assert!(first_detach.unwrap() < target_attaches[0]);
    }
}
