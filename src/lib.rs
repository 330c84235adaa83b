// src/lib.rs

pub mod batch;
pub mod cli;
pub mod color;
pub mod discover;
pub mod errors;
pub mod frame;
pub mod logging;
pub mod runner;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::batch::{BatchCoordinator, build_job, deploy_job};
use crate::cli::CliArgs;
use crate::discover::discover;
use crate::errors::Result;
use crate::runner::ProcessRunner;
use crate::types::Unit;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - unit discovery
/// - the batch coordinator with the real process runner
/// - the follow-up deploy command
pub async fn run(args: CliArgs) -> Result<()> {
    let root = PathBuf::from(&args.root);
    let units = discover(&root, &args.marker)?;

    let names: Vec<_> = units.iter().map(|u| u.name.as_str()).collect();
    info!(?names, marker = %args.marker, "discovered units");
    println!("Discovered targets: {}", names.join(", "));

    if args.dry_run {
        print_dry_run(&args, &units);
        return Ok(());
    }

    let jobs = units.iter().map(|u| build_job(&args.build_program, u)).collect();
    let follow_up = if args.skip_deploy {
        None
    } else {
        Some(deploy_job(&args.deploy_program))
    };

    let coordinator = BatchCoordinator::new(Arc::new(ProcessRunner), args.concurrency);
    let outcome = coordinator.run_batch(jobs, follow_up).await;

    let failed = outcome.failed_units();
    if failed.is_empty() {
        info!(units = outcome.results.len(), "batch finished cleanly");
    } else {
        warn!(?failed, "batch finished with failures");
    }

    Ok(())
}

/// Simple dry-run output: print units and the commands that would run.
fn print_dry_run(args: &CliArgs, units: &[Unit]) {
    println!("buildfleet dry-run");
    println!("  marker = {}", args.marker);
    match args.concurrency {
        Some(n) => println!("  concurrency = {n}"),
        None => println!("  concurrency = unbounded"),
    }
    println!();

    println!("units ({}):", units.len());
    for unit in units {
        let job = build_job(&args.build_program, unit);
        println!("  - {}", unit.name);
        println!("      cmd: {}", job.command.display());
    }

    if args.skip_deploy {
        println!("follow-up: skipped (--skip-deploy)");
    } else {
        let job = deploy_job(&args.deploy_program);
        println!("follow-up: {}", job.command.display());
    }
}
