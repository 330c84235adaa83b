// tests/process_runner.rs

//! Scenarios against the real process runner, using small shell commands.

#![cfg(unix)]

use std::sync::Arc;

use buildfleet::batch::BatchCoordinator;
use buildfleet::runner::{ProcessRunner, RunnerBackend};
use buildfleet::types::{BuildJob, CommandSpec, RunOutcome};
use buildfleet_test_utils::{init_tracing, with_timeout};

fn shell_job(label: &str, script: &str) -> BuildJob {
    BuildJob {
        label: label.to_string(),
        command: CommandSpec::new("sh", vec!["-c".to_string(), script.to_string()]),
    }
}

#[tokio::test]
async fn clean_exit_resolves_with_code_zero() {
    init_tracing();

    let runner = ProcessRunner;
    let result = with_timeout(runner.run(shell_job("ok", "echo hello"))).await;
    assert_eq!(result.unit, "ok");
    assert_eq!(result.outcome, RunOutcome::Exited(0));
}

#[tokio::test]
async fn non_zero_exit_code_is_reported_verbatim() {
    init_tracing();

    let runner = ProcessRunner;
    let result = with_timeout(runner.run(shell_job("bad", "exit 3"))).await;
    assert_eq!(result.outcome, RunOutcome::Exited(3));
}

#[tokio::test]
async fn missing_executable_resolves_with_spawn_error() {
    init_tracing();

    let runner = ProcessRunner;
    let job = BuildJob {
        label: "ghost".to_string(),
        command: CommandSpec::new("buildfleet-no-such-executable", Vec::new()),
    };
    let result = with_timeout(runner.run(job)).await;
    assert_eq!(result.unit, "ghost");
    assert!(matches!(result.outcome, RunOutcome::SpawnFailed(_)));
}

#[tokio::test]
async fn batch_with_real_processes_collects_every_result() {
    init_tracing();

    let coordinator = BatchCoordinator::new(Arc::new(ProcessRunner), None);
    let jobs = vec![
        shell_job("one", "echo one; exit 0"),
        shell_job("two", "echo two >&2; exit 1"),
        shell_job("three", "printf 'a\\nb\\nc\\n'"),
    ];

    let outcome =
        with_timeout(coordinator.run_batch(jobs, Some(shell_job("deploy", "true")))).await;

    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.failed_units(), vec!["two"]);
    let follow_up = outcome.follow_up.unwrap();
    assert_eq!(follow_up.outcome, RunOutcome::Exited(0));
}
