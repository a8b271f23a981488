// src/catalog/validate.rs

use crate::catalog::model::{Catalog, RawCatalogFile};
use crate::errors::{Result, TermdagError};

impl TryFrom<RawCatalogFile> for Catalog {
    type Error = TermdagError;

    fn try_from(raw: RawCatalogFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_catalog(&raw)?;
        Ok(Catalog::new_unchecked(raw.constraints, raw.course))
    }
}

/// Structural sanity for a loaded catalog file.
///
/// This rejects only inputs the engine cannot meaningfully plan against
/// (no courses, a zero cap, an inverted credit range). Dangling
/// prerequisite/corequisite references and cycles deliberately pass:
/// they are in-domain conditions the engine reports as notes so partial
/// plans can still be shown.
fn validate_raw_catalog(raw: &RawCatalogFile) -> Result<()> {
    ensure_has_courses(raw)?;
    validate_constraints(raw)?;
    Ok(())
}

fn ensure_has_courses(raw: &RawCatalogFile) -> Result<()> {
    if raw.course.is_empty() {
        return Err(TermdagError::CatalogError(
            "catalog must contain at least one [course.<ID>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_constraints(raw: &RawCatalogFile) -> Result<()> {
    let c = &raw.constraints;

    if c.max_credits_per_term == 0 {
        return Err(TermdagError::CatalogError(
            "[constraints].max_credits_per_term must be >= 1 (got 0)".to_string(),
        ));
    }

    if let Some(min) = c.min_credits_per_term
        && min > c.max_credits_per_term
    {
        return Err(TermdagError::CatalogError(format!(
            "[constraints].min_credits_per_term ({}) cannot exceed max_credits_per_term ({})",
            min, c.max_credits_per_term
        )));
    }

    if let Some(max_terms) = c.max_terms
        && max_terms == 0
    {
        return Err(TermdagError::CatalogError(
            "[constraints].max_terms must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}
