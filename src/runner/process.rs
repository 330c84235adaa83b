// src/runner/process.rs

//! Real process runner: spawn, pump streams, resolve exit status.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use owo_colors::{AnsiColors, OwoColorize};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::color::{ColorUsage, color_for};
use crate::frame::frame;
use crate::runner::RunnerBackend;
use crate::types::{BuildJob, RunOutcome, RunResult};

/// Runner that spawns one OS process per job and echoes its output to the
/// orchestrator's stdout with colored per-unit prefixes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl RunnerBackend for ProcessRunner {
    fn run(&self, job: BuildJob) -> Pin<Box<dyn Future<Output = RunResult> + Send + '_>> {
        Box::pin(run_job(job))
    }
}

async fn run_job(job: BuildJob) -> RunResult {
    let prefix_out = stdout_prefix(&job.label);
    let prefix_err = stderr_prefix(&job.label);

    info!(
        unit = %job.label,
        cmd = %job.command.display(),
        "starting build process"
    );

    let mut cmd = Command::new(&job.command.program);
    cmd.args(&job.command.args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            warn!(unit = %job.label, error = %err, "failed to spawn build process");
            return RunResult {
                unit: job.label,
                outcome: RunOutcome::SpawnFailed(err.to_string()),
            };
        }
    };

    // Each stream gets its own pump task so reads never block each other or
    // sibling runners. Output between the two streams (and between units) is
    // deliberately interleaved; framing keeps each printed block intact.
    let out_pump = child
        .stdout
        .take()
        .map(|stream| tokio::spawn(pump_stream(stream, prefix_out)));
    let err_pump = child
        .stderr
        .take()
        .map(|stream| tokio::spawn(pump_stream(stream, prefix_err)));

    let status = child.wait().await;

    // Drain whatever the pumps still have buffered before resolving, so the
    // follow-up command never prints ahead of a finished unit's output.
    if let Some(handle) = out_pump {
        let _ = handle.await;
    }
    if let Some(handle) = err_pump {
        let _ = handle.await;
    }

    let outcome = match status {
        Ok(status) => {
            let code = status.code().unwrap_or(-1);
            info!(unit = %job.label, exit_code = code, "build process exited");
            RunOutcome::Exited(code)
        }
        Err(err) => {
            warn!(unit = %job.label, error = %err, "waiting on build process failed");
            RunOutcome::Exited(-1)
        }
    };

    RunResult {
        unit: job.label,
        outcome,
    }
}

/// Read raw chunks off one stream and print them as framed, prefixed blocks.
async fn pump_stream<S>(mut stream: S, prefix: String)
where
    S: AsyncRead + Unpin,
{
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let framed = frame(&buf[..n], &prefix);
                if !framed.is_empty() {
                    println!("{prefix}{framed}");
                }
            }
            Err(err) => {
                debug!(error = %err, "stream read ended with error");
                break;
            }
        }
    }
}

/// Prefix for stdout lines: the unit tag in the label's hash-derived color.
fn stdout_prefix(label: &str) -> String {
    let color = color_for(label, ColorUsage::Foreground);
    format!("{}: ", format!("[{label}] stdout").color(color))
}

/// Prefix for stderr lines: always on a red background so errors stand out
/// regardless of which color the label hashed to.
fn stderr_prefix(label: &str) -> String {
    format!("{}: ", format!("[{label}] stderr").on_color(AnsiColors::Red))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_stable_per_label() {
        assert_eq!(stdout_prefix("api"), stdout_prefix("api"));
        assert_eq!(stderr_prefix("api"), stderr_prefix("api"));
    }

    #[test]
    fn stderr_prefix_is_label_independent_in_style() {
        // Both carry the red-background escape regardless of the label hash.
        assert!(stderr_prefix("api").contains("\x1b[41m"));
        assert!(stderr_prefix("web").contains("\x1b[41m"));
    }
}
