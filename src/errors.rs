// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FleetError>;
