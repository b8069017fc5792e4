//! Runs alone in its own binary: it writes an executable script, and a
//! concurrent fork elsewhere in the process could make executing it fail
//! with ETXTBSY.
#![cfg(unix)]

use std::{
    env, fs,
    io::Write,
    os::unix::fs::PermissionsExt,
    path::PathBuf,
    process::{Command, Stdio},
};

/// Stands in for `ctrlc`: delivers SIGTERM to the pid it is given, late
/// enough for the child to have installed its trap and echoed its input.
fn fake_sender() -> PathBuf {
    let path = env::temp_dir().join(format!("ctrlc-wrapper-fake-sender-{}", std::process::id()));
    fs::write(&path, "#!/bin/sh\nsleep 1\nkill -TERM \"$1\"\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn sentinel_line_terminates_child() {
    let sender = fake_sender();
    let script =
        "trap 'exit 130' TERM; while read line; do echo \"got:$line\"; done; echo EOF; exit 0";

    let mut child = Command::new(env!("CARGO_BIN_EXE_start"))
        .arg("--ctrlc-path")
        .arg(&sender)
        .args(["sh", "-c", script])
        .env_remove("CTRLC_WRAPPER_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // held open for the whole run, so the child can only see EOF if the
    // supervisor closes its stdin
    let mut input = child.stdin.take().unwrap();
    input.write_all(b"a\n^C\nb\n").unwrap();
    input.flush().unwrap();
    let output = child.wait_with_output().unwrap();
    drop(input);
    let _ = fs::remove_file(&sender);

    assert_eq!(output.status.code(), Some(130));
    assert_eq!(output.stdout, b"got:a\n");
}
