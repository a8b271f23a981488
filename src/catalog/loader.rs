// src/catalog/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::model::{Catalog, RawCatalogFile};
use crate::errors::Result;

/// Load a catalog file from a given path and return the raw `RawCatalogFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (constraint sanity, etc.). Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawCatalogFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let catalog: RawCatalogFile = toml::from_str(&contents)?;

    Ok(catalog)
}

/// Load a catalog file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks constraint sanity (positive cap, min <= max).
///
/// Note that dangling prerequisite references and prerequisite cycles are
/// *not* rejected here; the planning engine reports them as diagnostics on
/// the result instead.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Catalog> {
    let raw = load_from_path(&path)?;
    let catalog = Catalog::try_from(raw)?;
    Ok(catalog)
}

/// Helper to resolve a default catalog path.
///
/// Currently this just returns `Curriculum.toml` in the current working
/// directory, but this function exists so you can later:
///
/// - Respect an env var (e.g. `TERMDAG_CATALOG`).
/// - Look for multiple default locations.
pub fn default_catalog_path() -> PathBuf {
    PathBuf::from("Curriculum.toml")
}
