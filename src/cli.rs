// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `buildfleet`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "buildfleet",
    version,
    about = "Build every marked subdirectory in parallel, then deploy.",
    long_about = None
)]
pub struct CliArgs {
    /// Root directory to scan for buildable units.
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: String,

    /// Marker file whose presence makes a subdirectory a unit.
    #[arg(long, value_name = "FILE", default_value = "Dockerfile")]
    pub marker: String,

    /// Program used to build each unit (`<program> build -t <name>:latest ./<name>`).
    #[arg(long, value_name = "PROGRAM", default_value = "docker")]
    pub build_program: String,

    /// Program used for the follow-up deploy (`<program> apply -f ./k8s`).
    #[arg(long, value_name = "PROGRAM", default_value = "kubectl")]
    pub deploy_program: String,

    /// Maximum number of concurrently-running builds.
    ///
    /// If omitted, every discovered unit is built simultaneously.
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Skip the follow-up deploy command after the batch.
    #[arg(long)]
    pub skip_deploy: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BUILDFLEET_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Discover units and print the commands that would run, without executing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
