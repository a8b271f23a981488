// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

/// Hard failures at the contract boundary (unreadable or malformed input).
///
/// In-domain planning conditions (cycles, missing prerequisites, oversized
/// terms, ...) are never surfaced through this type; they are reported as
/// notes on the [`PlanResult`](crate::plan::PlanResult) together with the
/// feasibility flag.
#[derive(Error, Debug)]
pub enum TermdagError {
    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TermdagError>;
