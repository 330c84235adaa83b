use std::path::PathBuf;

/// Canonical unit label type used throughout the crate.
pub type UnitName = String;

/// One discovered buildable subdirectory.
///
/// Identity is the `name` (the directory's basename); units are discovered once
/// per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub name: UnitName,
    pub working_path: PathBuf,
}

/// An external program plus its full argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Render as a single shell-like string for logs and dry-run output.
    pub fn display(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            out.push_str(arg);
        }
        out
    }
}

/// A single piece of work for a runner: a command to execute, tagged with the
/// label that drives the colored output prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildJob {
    pub label: UnitName,
    pub command: CommandSpec,
}

/// Terminal state of one external process invocation.
///
/// `Exited(-1)` is the sentinel for a process that terminated without an exit
/// code (killed by a signal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Exited(i32),
    SpawnFailed(String),
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        matches!(self, RunOutcome::Exited(0))
    }
}

/// Outcome of one runner call. Created exactly once per job, when the process
/// reaches a terminal state; owned by the batch coordinator that requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub unit: UnitName,
    pub outcome: RunOutcome,
}

/// Aggregate outcome of one batch: every discovered unit yields exactly one
/// `RunResult` before the follow-up command is considered.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub results: Vec<RunResult>,
    /// Result of the follow-up command, if one was configured.
    pub follow_up: Option<RunResult>,
}

impl BatchOutcome {
    /// Names of all units that did not exit cleanly.
    pub fn failed_units(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.outcome.success())
            .map(|r| r.unit.as_str())
            .collect()
    }
}
