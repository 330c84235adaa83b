// src/discover.rs

//! Unit discovery: find buildable subdirectories under a root.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::errors::{FleetError, Result};
use crate::types::Unit;

/// Scan the immediate entries of `root` and keep every subdirectory that
/// contains a file named `marker`.
///
/// Returned order is the underlying directory-listing order; callers must not
/// rely on it being sorted. An unreadable `root` is fatal: no partial
/// discovery is attempted.
pub fn discover(root: &Path, marker: &str) -> Result<Vec<Unit>> {
    let entries = fs::read_dir(root).map_err(|e| {
        FleetError::Discovery(format!("reading root directory {}: {e}", root.display()))
    })?;

    let mut units = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        if !has_marker(&path, marker)? {
            debug!(dir = %path.display(), marker, "skipping directory without marker");
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        units.push(Unit {
            name,
            working_path: path,
        });
    }

    Ok(units)
}

fn has_marker(dir: &Path, marker: &str) -> Result<bool> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("listing unit candidate {}", dir.display()))
        .map_err(FleetError::Other)?;

    for entry in entries {
        let entry = entry?;
        if entry.file_name() == marker {
            return Ok(true);
        }
    }
    Ok(false)
}
