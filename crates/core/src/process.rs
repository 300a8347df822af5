// Copyright 2025 Parabench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Child-process invocation with a hard wall-clock timeout.
//!
//! Benchmarked kernels are untrusted external code that may hang, so the
//! wait is bounded: on expiry the child is killed and reaped rather than
//! left to block the sweep or linger as an orphan.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// How often the child is polled while waiting for it to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of one child-process invocation.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// The child exited within the time budget. A non-zero exit code is
    /// reported here, not conflated with a launch failure; the caller
    /// decides its disposition.
    Completed {
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
        /// Exit code; -1 when the child was terminated by a signal.
        exit_code: i32,
    },
    /// The time budget expired; the child has been killed and reaped.
    TimedOut,
    /// The executable could not be spawned at all.
    LaunchFailed {
        /// Operating-system error text.
        reason: String,
    },
}

/// Run `executable` with `args`, waiting at most `timeout` for it to exit.
///
/// The call blocks the current thread; the harness issues one child at a
/// time by design. Kernels write a single line to stdout, so the pipes are
/// drained after exit; a child must not produce more output than the pipe
/// buffer holds before exiting.
pub fn run(executable: &Path, args: &[String], timeout: Duration) -> ProcessOutcome {
    let mut child = match Command::new(executable)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            return ProcessOutcome::LaunchFailed {
                reason: err.to_string(),
            }
        }
    };

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = drain(child.stdout.take());
                let stderr = drain(child.stderr.take());
                return ProcessOutcome::Completed {
                    stdout,
                    stderr,
                    exit_code: status.code().unwrap_or(-1),
                };
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    // Kill and reap so no zombie outlives the trial.
                    let _ = child.kill();
                    let _ = child.wait();
                    return ProcessOutcome::TimedOut;
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return ProcessOutcome::LaunchFailed {
                    reason: err.to_string(),
                };
            }
        }
    }
}

fn drain<R: Read>(pipe: Option<R>) -> String {
    let mut buf = String::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_string(&mut buf);
    }
    buf
}
