use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use buildfleet::runner::RunnerBackend;
use buildfleet::types::{BuildJob, RunOutcome, RunResult};

/// Start/resolution bookkeeping for one fake run.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub label: String,
    pub started_at: Instant,
    pub resolved_at: Instant,
}

/// A fake runner that:
/// - records which jobs were started, in start order
/// - resolves each job with a scripted outcome (default: exit 0)
/// - optionally sleeps per job, and/or blocks every job on a shared gate
///   until the test releases it.
///
/// The gate is what the concurrency test uses to prove that all jobs are
/// started before any of them finishes.
pub struct FakeRunner {
    outcomes: HashMap<String, RunOutcome>,
    delay: Option<Duration>,
    gate: Option<watch::Receiver<bool>>,
    started: Arc<Mutex<Vec<String>>>,
    records: Arc<Mutex<Vec<RunRecord>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            delay: None,
            gate: None,
            started: Arc::new(Mutex::new(Vec::new())),
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script the outcome for a specific label.
    pub fn with_outcome(mut self, label: &str, outcome: RunOutcome) -> Self {
        self.outcomes.insert(label.to_string(), outcome);
        self
    }

    /// Sleep this long inside every run before resolving.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Hold every run until the sender side publishes `true`.
    pub fn with_gate(mut self, gate: watch::Receiver<bool>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Labels of all jobs started so far, in start order.
    pub fn started(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    /// Records of all jobs resolved so far.
    pub fn records(&self) -> Vec<RunRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RunnerBackend for FakeRunner {
    fn run(&self, job: BuildJob) -> Pin<Box<dyn Future<Output = RunResult> + Send + '_>> {
        let outcome = self
            .outcomes
            .get(&job.label)
            .cloned()
            .unwrap_or(RunOutcome::Exited(0));
        let delay = self.delay;
        let mut gate = self.gate.clone();
        let started = Arc::clone(&self.started);
        let records = Arc::clone(&self.records);

        Box::pin(async move {
            let started_at = Instant::now();
            {
                let mut guard = started.lock().unwrap();
                guard.push(job.label.clone());
            }

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if let Some(gate) = gate.as_mut() {
                while !*gate.borrow() {
                    if gate.changed().await.is_err() {
                        break;
                    }
                }
            }

            let resolved_at = Instant::now();
            {
                let mut guard = records.lock().unwrap();
                guard.push(RunRecord {
                    label: job.label.clone(),
                    started_at,
                    resolved_at,
                });
            }

            RunResult {
                unit: job.label,
                outcome,
            }
        })
    }
}
