//! Shell command execution with a hard timeout
//!
//! One command line per call, run under the platform shell with piped
//! stdout/stderr and null stdin. The child inherits the harness's environment
//! and working directory. No process handle outlives the call: the child is
//! waited on, or killed once the deadline passes, before `run_shell` returns.
//!
//! `std::process` has no built-in wait-with-deadline, so the wait is a
//! `try_wait` poll loop against an `Instant` deadline. Both output pipes are
//! drained on dedicated reader threads while polling; draining inline could
//! deadlock against a child that fills its pipe buffer before exiting.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Interval between `try_wait` polls while the child is running.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors that occur while running a case's command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn shell: {0}")]
    Spawn(#[source] io::Error),

    #[error("command did not complete within {}s", timeout.as_secs_f64())]
    TimedOut { timeout: Duration },

    #[error("failed to capture command output: {0}")]
    Capture(#[source] io::Error),
}

/// Captured output of a completed command.
#[derive(Debug)]
pub struct ShellOutput {
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,
    /// Standard error, captured separately and never asserted on.
    pub stderr: String,
    /// Exit status, available but not asserted on.
    pub status: ExitStatus,
}

/// Run `command` under the platform shell, waiting at most `timeout`.
///
/// On timeout the child is killed and reaped before the error is returned.
pub fn run_shell(command: &str, timeout: Duration) -> Result<ShellOutput, ExecError> {
    tracing::debug!(%command, "spawning shell command");

    let mut child = shell_command(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(ExecError::Spawn)?;

    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let status = wait_with_deadline(&mut child, timeout)?;

    let stdout = join_reader(stdout_reader)?;
    let stderr = join_reader(stderr_reader)?;

    Ok(ShellOutput {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        status,
    })
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Poll the child until it exits or the deadline passes; kill on expiry.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<ExitStatus, ExecError> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait().map_err(ExecError::Capture)? {
            Some(status) => return Ok(status),
            None if Instant::now() >= deadline => {
                // Reap the child so no zombie outlives this call. Kill can
                // race with a natural exit; either way wait() settles it.
                let _ = child.kill();
                let _ = child.wait();
                return Err(ExecError::TimedOut { timeout });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    }
}

fn spawn_reader(pipe: Option<impl Read + Send + 'static>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join_reader(handle: JoinHandle<io::Result<Vec<u8>>>) -> Result<Vec<u8>, ExecError> {
    handle
        .join()
        .map_err(|_| ExecError::Capture(io::Error::other("output reader thread panicked")))?
        .map_err(ExecError::Capture)
}

// ============================================================================
// Tests
// ============================================================================
