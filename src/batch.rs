// src/batch.rs

//! Batch coordination: fan out one runner per unit, join all, then fire the
//! follow-up command.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::runner::RunnerBackend;
use crate::types::{BatchOutcome, BuildJob, CommandSpec, RunResult, Unit};

/// Fans out build jobs to a [`RunnerBackend`] and aggregates their results.
///
/// All jobs are started without waiting on each other. With no concurrency
/// cap set (the default), N units mean N simultaneously-running processes;
/// a cap turns the fan-out into a bounded worker pool without changing any
/// other semantics.
pub struct BatchCoordinator<R: RunnerBackend + 'static> {
    runner: Arc<R>,
    concurrency: Option<usize>,
}

impl<R: RunnerBackend + 'static> BatchCoordinator<R> {
    pub fn new(runner: Arc<R>, concurrency: Option<usize>) -> Self {
        Self {
            runner,
            concurrency,
        }
    }

    /// Run every job to a terminal state, then run `follow_up` exactly once.
    ///
    /// The follow-up fires regardless of how many units failed; failures are
    /// summarized first so the operator sees them before the follow-up output
    /// starts. Every job yields exactly one result, spawn failures included.
    pub async fn run_batch(
        &self,
        jobs: Vec<BuildJob>,
        follow_up: Option<BuildJob>,
    ) -> BatchOutcome {
        let expected = jobs.len();
        let limit = self.concurrency.map(|n| Arc::new(Semaphore::new(n)));

        let mut set = JoinSet::new();
        for job in jobs {
            let runner = Arc::clone(&self.runner);
            let limit = limit.clone();
            set.spawn(async move {
                let _permit = match &limit {
                    Some(semaphore) => semaphore.acquire().await.ok(),
                    None => None,
                };
                runner.run(job).await
            });
        }

        let mut results: Vec<RunResult> = Vec::with_capacity(expected);
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(err) => error!(error = %err, "runner task panicked"),
            }
        }
        info!(
            completed = results.len(),
            expected, "all build processes reached a terminal state"
        );

        let failed: Vec<_> = results
            .iter()
            .filter(|r| !r.outcome.success())
            .map(|r| r.unit.as_str())
            .collect();
        if !failed.is_empty() {
            warn!(?failed, "some units failed; follow-up command runs anyway");
        }

        let follow_up = match follow_up {
            Some(job) => {
                info!(cmd = %job.command.display(), "batch complete; running follow-up command");
                Some(self.runner.run(job).await)
            }
            None => None,
        };

        BatchOutcome { results, follow_up }
    }
}

/// Build invocation for one unit: `<program> build -t <name>:latest ./<name>`.
pub fn build_job(program: &str, unit: &Unit) -> BuildJob {
    BuildJob {
        label: unit.name.clone(),
        command: CommandSpec::new(
            program,
            vec![
                "build".to_string(),
                "-t".to_string(),
                format!("{}:latest", unit.name),
                format!("./{}", unit.name),
            ],
        ),
    }
}

/// Follow-up invocation: `<program> apply -f ./k8s`, labeled `deploy`.
pub fn deploy_job(program: &str) -> BuildJob {
    BuildJob {
        label: "deploy".to_string(),
        command: CommandSpec::new(
            program,
            vec![
                "apply".to_string(),
                "-f".to_string(),
                "./k8s".to_string(),
            ],
        ),
    }
}
