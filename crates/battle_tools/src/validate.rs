//! Catalog validation.

use std::path::Path;

use battle_core::error::BattleError;
use thiserror::Error;

use crate::catalog_loader::{load_catalog, CatalogLoadError};

/// Why a catalog file failed validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The file could not be loaded.
    #[error(transparent)]
    Load(#[from] CatalogLoadError),

    /// The catalog loaded but has invalid entries.
    #[error("{} invalid archetype(s)", .0.len())]
    Invalid(Vec<BattleError>),
}

/// Validate the catalog file at `path`.
///
/// Returns the number of archetypes checked.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or any archetype is invalid.
pub fn validate_catalog_file(path: &Path) -> Result<usize, ValidationError> {
    let catalog = load_catalog(path)?;
    let problems = catalog.validate();

    for problem in &problems {
        tracing::error!("{problem}");
    }
    if !problems.is_empty() {
        return Err(ValidationError::Invalid(problems));
    }

    if catalog.units.is_empty() {
        tracing::warn!(path = %path.display(), "Catalog has no archetypes");
    }
    Ok(catalog.units.len())
}
