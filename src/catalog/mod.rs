// src/catalog/mod.rs

//! Catalog loading and validation for termdag.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a catalog file from disk (`loader.rs`).
//! - Validate structural invariants like constraint sanity (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_catalog_path, load_and_validate, load_from_path};
pub use model::{Catalog, Course, CourseId, CourseSpec, PlanConstraints, RawCatalogFile};
