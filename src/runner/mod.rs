// src/runner/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running one external command per
//! unit, using `tokio::process::Command`, and resolving each run to a
//! [`RunResult`](crate::types::RunResult) for the batch coordinator.
//!
//! - [`process`] owns the real implementation: spawning, stream pumping,
//!   colored prefixing.
//! - [`RunnerBackend`] abstracts the runner so tests can substitute a fake
//!   that doesn't spawn real processes.

use std::future::Future;
use std::pin::Pin;

use crate::types::{BuildJob, RunResult};

pub mod process;

pub use process::ProcessRunner;

/// Trait abstracting how a single build job is executed.
///
/// Production code uses [`ProcessRunner`]; tests can provide their own
/// implementation that records jobs and resolves scripted outcomes.
///
/// A runner call always resolves to a `RunResult`; spawn failures are carried
/// inside the result rather than surfaced as errors, so one broken unit never
/// takes down its siblings.
pub trait RunnerBackend: Send + Sync {
    fn run(&self, job: BuildJob) -> Pin<Box<dyn Future<Output = RunResult> + Send + '_>>;
}
