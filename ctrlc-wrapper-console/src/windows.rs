#[cfg(target_os = "windows")]
use crate::console::{AttachTarget, Console, ConsoleError, ControlEvent};

#[cfg(target_os = "windows")]
pub struct WinConsole;

#[cfg(target_os = "windows")]
impl Console for WinConsole {
    fn detach(&mut self) -> Result<(), ConsoleError> {
        use winapi::um::wincon::FreeConsole;

        if unsafe { FreeConsole() } == 0 {
            return Err(ConsoleError::last_os_error("FreeConsole"));
        }
        Ok(())
    }

    fn attach(&mut self, target: AttachTarget) -> Result<(), ConsoleError> {
        use winapi::um::wincon::{AttachConsole, ATTACH_PARENT_PROCESS};

        let pid = match target {
            AttachTarget::Process(pid) => pid,
            AttachTarget::Parent => ATTACH_PARENT_PROCESS,
        };
        if unsafe { AttachConsole(pid) } == 0 {
            return Err(ConsoleError::last_os_error("AttachConsole"));
        }
        Ok(())
    }

    fn ignore_ctrl_c(&mut self) -> Result<(), ConsoleError> {
        use winapi::shared::minwindef::TRUE;
        use winapi::um::consoleapi::SetConsoleCtrlHandler;

        if unsafe { SetConsoleCtrlHandler(None, TRUE) } == 0 {
            return Err(ConsoleError::last_os_error("SetConsoleCtrlHandler"));
        }
        Ok(())
    }

    fn broadcast(&mut self, event: ControlEvent) -> Result<(), ConsoleError> {
        use winapi::um::wincon::{GenerateConsoleCtrlEvent, CTRL_BREAK_EVENT, CTRL_C_EVENT};

        let event = match event {
            ControlEvent::CtrlC => CTRL_C_EVENT,
            ControlEvent::CtrlBreak => CTRL_BREAK_EVENT,
        };
        // group 0: every process attached to the current console
        if unsafe { GenerateConsoleCtrlEvent(event, 0) } == 0 {
            return Err(ConsoleError::last_os_error("GenerateConsoleCtrlEvent"));
        }
        Ok(())
    }
}
