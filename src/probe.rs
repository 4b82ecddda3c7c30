//! Bounded external-process probes.
//!
//! Detection and auth checks must not hang on a wedged binary, so every
//! probe is spawned with piped output and killed once its deadline passes.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Default deadline for presence and auth probes.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Poll interval while waiting for a probe to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured output of a completed probe.
#[derive(Debug)]
pub struct ProbeOutput {
    /// Whether the probe exited with status zero.
    pub success: bool,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,
}

/// Run a short-lived command, killing it if the deadline passes.
///
/// Returns `None` on spawn failure or timeout; callers treat both as an
/// unknown result, never as an error to propagate.
pub fn run_bounded(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
    timeout: Duration,
) -> Option<ProbeOutput> {
    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            tracing::debug!(program, error = %e, "Probe spawn failed");
            return None;
        }
    };

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(_)) => break,
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::debug!(program, ?timeout, "Probe timed out");
                    return None;
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                tracing::debug!(program, error = %e, "Probe wait failed");
                return None;
            }
        }
    }

    let output = child.wait_with_output().ok()?;
    Some(ProbeOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}
