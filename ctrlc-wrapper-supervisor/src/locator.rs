use std::{
    env,
    ffi::OsString,
    io,
    path::{Component, Path, PathBuf},
};

use tokio::process::Command;

/// Name of the signal sender binary, built from `ctrlc-wrapper-console`.
pub const SENDER_NAME: &str = "ctrlc";

/// Directory name cargo uses for test harnesses and build intermediates.
const DEV_MARKER: &str = "deps";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SenderCommand {
    Binary(PathBuf),
    /// `cargo run` from the workspace, used when running out of a build tree.
    Cargo { workspace: PathBuf },
}

impl SenderCommand {
    pub fn program(&self) -> OsString {
        match self {
            SenderCommand::Binary(path) => path.clone().into_os_string(),
            SenderCommand::Cargo { .. } => OsString::from("cargo"),
        }
    }

    pub fn args(&self, pid: u32) -> Vec<OsString> {
        let mut args: Vec<OsString> = match self {
            SenderCommand::Binary(_) => Vec::new(),
            SenderCommand::Cargo { .. } => ["run", "--quiet", "--bin", SENDER_NAME, "--"]
                .into_iter()
                .map(OsString::from)
                .collect(),
        };
        args.push(OsString::from(pid.to_string()));
        args
    }

    pub fn command(&self, pid: u32) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args(pid));
        if let SenderCommand::Cargo { workspace } = self {
            command.current_dir(workspace);
        }
        command
    }
}

/// Finds the signal sender for the running supervisor.
pub fn resolve(explicit: Option<&Path>) -> io::Result<SenderCommand> {
    if let Some(path) = explicit {
        return Ok(SenderCommand::Binary(path.to_path_buf()));
    }
    let exe = env::current_exe()?;
    let cwd = env::current_dir()?;
    locate(&exe, &cwd)
}

/// Resolves the sender next to `exe`, or through cargo when `exe` lives in
/// a cargo `deps` directory.
pub fn locate(exe: &Path, cwd: &Path) -> io::Result<SenderCommand> {
    let dir = exe.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("Executable path {} has no parent directory", exe.display()),
        )
    })?;

    let in_build_tree = dir
        .components()
        .any(|component| matches!(component, Component::Normal(name) if name == DEV_MARKER));
    if in_build_tree {
        return Ok(SenderCommand::Cargo {
            workspace: cwd.to_path_buf(),
        });
    }

    Ok(SenderCommand::Binary(dir.join(format!(
        "{}{}",
        SENDER_NAME,
        env::consts::EXE_SUFFIX
    ))))
}
