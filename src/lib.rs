//! In-memory search and export over a static catalog of adversary
//! techniques.
//!
//! The crate is organized as four independent, composable layers. A caller
//! builds a [`Catalog`] once at startup (from raw records or a JSON file),
//! runs [`search()`] with an optional [`Query`], then hands the resulting
//! [`ResultSet`] to [`render()`] for display or [`export()`] for persistence.
//! The catalog is immutable for the life of the process; queries and result
//! sets are transient per invocation. The query and export layers never call
//! each other.
//!
//! Errors follow a fixed taxonomy: [`ValidationError`] while loading,
//! [`QueryError`] for filter values outside the known tactic/severity
//! domains, [`ExportError`] for unsupported formats or unwritable
//! destinations. All propagate to the caller; nothing is retried.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub mod catalog;
pub mod error;
pub mod export;
pub mod query;
pub mod render;

pub use catalog::{Catalog, RawTechnique, Severity, Tactic, Technique, TechniqueId};
pub use error::{ExportError, QueryError, ValidationError};
pub use export::{ExportFormat, TACTIC_SEPARATOR, export, export_to_path};
pub use query::{Query, ResultSet, search};
pub use render::{NO_RESULTS, render};

/// Read a JSON array of raw technique entries from disk and build a
/// validated catalog.
///
/// Convenience for binaries and tests; library callers that already hold raw
/// records use [`Catalog::from_records`] directly.
pub fn load_catalog_from_path(path: &Path) -> Result<Catalog> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<RawTechnique> = serde_json::from_str(&data)
        .with_context(|| format!("parsing technique entries from {}", path.display()))?;
    let catalog = Catalog::from_records(records)
        .with_context(|| format!("validating catalog from {}", path.display()))?;
    Ok(catalog)
}
