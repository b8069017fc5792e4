use std::io;

use log::debug;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt},
    sync::{oneshot, watch},
};

use crate::child::ChildState;

/// Input line that asks for the child to be stopped.
pub const SENTINEL: &[u8] = b"^C";

#[derive(Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Sentinel,
    Eof,
}

/// Copies a child output stream verbatim until it closes.
pub async fn forward_output<R, W>(mut reader: R, mut writer: W) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let copied = tokio::io::copy(&mut reader, &mut writer).await?;
    writer.flush().await?;
    Ok(copied)
}

/// Longest input line accepted, terminator included.
pub const MAX_LINE: usize = 64 * 1024;

/// Feeds `input` to the child line by line until the sentinel or EOF.
///
/// Lines keep their original terminator. Lines read while the child is not
/// running are dropped. The sentinel itself is never written and nothing
/// after it is read. The writer is only borrowed: the caller decides when the
/// child's stdin closes.
pub async fn forward_input<R, W>(
    mut input: R,
    child_stdin: &mut W,
    state: &watch::Receiver<ChildState>,
    sentinel: oneshot::Sender<()>,
) -> io::Result<InputOutcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if read_line(&mut input, &mut line).await? == 0 {
            return Ok(InputOutcome::Eof);
        }

        if is_sentinel(&line) {
            debug!("Received ^C on stdin");
            let _ = sentinel.send(());
            return Ok(InputOutcome::Sentinel);
        }

        let running = matches!(*state.borrow(), ChildState::Running);
        if !running {
            debug!("Child not running, dropping {} bytes of input", line.len());
            continue;
        }

        if let Err(err) = write_line(child_stdin, &line).await {
            debug!("Failed to forward input to child: {}", err);
        }
    }
}

/// `read_until(b'\n')` that gives up once a line passes [`MAX_LINE`].
async fn read_line<R: AsyncBufRead + Unpin>(input: &mut R, line: &mut Vec<u8>) -> io::Result<usize> {
    loop {
        let available = input.fill_buf().await?;
        if available.is_empty() {
            return Ok(line.len());
        }

        let (taken, complete) = match available.iter().position(|&b| b == b'\n') {
            Some(end) => (end + 1, true),
            None => (available.len(), false),
        };
        if line.len() + taken > MAX_LINE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("input line longer than {} bytes", MAX_LINE),
            ));
        }

        line.extend_from_slice(&available[..taken]);
        input.consume(taken);
        if complete {
            return Ok(line.len());
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &[u8]) -> io::Result<()> {
    writer.write_all(line).await?;
    writer.flush().await
}

pub fn is_sentinel(line: &[u8]) -> bool {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    line == SENTINEL
}
