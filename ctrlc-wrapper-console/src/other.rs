#[cfg(not(target_os = "windows"))]
use crate::console::{AttachTarget, Console, ConsoleError, ControlEvent};

#[cfg(not(target_os = "windows"))]
pub struct UnsupportedConsole;

#[cfg(not(target_os = "windows"))]
impl Console for UnsupportedConsole {
    fn detach(&mut self) -> Result<(), ConsoleError> {
        Err(ConsoleError::Unsupported {
            operation: "FreeConsole",
        })
    }

    fn attach(&mut self, _target: AttachTarget) -> Result<(), ConsoleError> {
        Err(ConsoleError::Unsupported {
            operation: "AttachConsole",
        })
    }

    fn ignore_ctrl_c(&mut self) -> Result<(), ConsoleError> {
        Err(ConsoleError::Unsupported {
            operation: "SetConsoleCtrlHandler",
        })
    }

    fn broadcast(&mut self, _event: ControlEvent) -> Result<(), ConsoleError> {
        Err(ConsoleError::Unsupported {
            operation: "GenerateConsoleCtrlEvent",
        })
    }
}
