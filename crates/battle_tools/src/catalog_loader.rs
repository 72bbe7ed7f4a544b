//! Unit catalog loading from RON files.

use std::fs;
use std::path::{Path, PathBuf};

use battle_core::catalog::UnitCatalog;
use thiserror::Error;

/// Environment variable overriding the catalog location.
pub const CATALOG_ENV: &str = "BATTLE_CATALOG";

/// Catalog location relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "assets/data/units.ron";

/// Errors that can occur during catalog loading.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// Failed to read file.
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        /// Path to the file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON file.
    #[error("Failed to parse catalog '{path}': {message}")]
    Parse {
        /// Path to the file.
        path: String,
        /// Parser error message.
        message: String,
    },

    /// Catalog file does not exist.
    #[error("Catalog not found: {0}")]
    NotFound(String),
}

/// Load a unit catalog from a RON file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or not a valid catalog.
pub fn load_catalog(path: &Path) -> Result<UnitCatalog, CatalogLoadError> {
    if !path.exists() {
        return Err(CatalogLoadError::NotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let catalog = UnitCatalog::from_ron_str(&content).map_err(|e| CatalogLoadError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    tracing::info!(
        path = %path.display(),
        archetypes = catalog.units.len(),
        "Loaded unit catalog"
    );
    Ok(catalog)
}

/// Resolve the catalog path: explicit flag, then `BATTLE_CATALOG`, then
/// [`DEFAULT_CATALOG_PATH`].
#[must_use]
pub fn resolve_catalog_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os(CATALOG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH))
}
