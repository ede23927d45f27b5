//! Error taxonomy exposed by the crate API.
//!
//! Three kinds, matching the three fallible stages: building a catalog,
//! parsing a query, and writing an export. Each variant carries the offending
//! field or value so callers can surface a precise message. Nothing here is
//! retried or recovered internally.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Raised while building a [`Catalog`](crate::Catalog) from raw entries.
///
/// Any variant aborts the whole load; no partial catalog is ever returned.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("entry {index} has an empty technique id")]
    EmptyId { index: usize },
    #[error("technique {id} has an empty name")]
    EmptyName { id: String },
    #[error("duplicate technique id {id}")]
    DuplicateId { id: String },
    #[error("technique {id} declares unknown severity '{value}' (expected LOW|MEDIUM|HIGH|CRITICAL)")]
    UnknownSeverity { id: String, value: String },
    #[error("technique {id} declares unknown tactic '{value}' (expected a TA-code such as TA0001)")]
    UnknownTactic { id: String, value: String },
}

/// Raised when a filter value lies outside the known tactic or severity
/// domain. Surfaced before any filtering happens so an impossible filter is
/// never mistaken for an empty result.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unknown tactic '{0}' (expected a TA-code such as TA0001 or a phase name such as initial-access)")]
    UnknownTactic(String),
    #[error("unknown severity '{0}' (expected LOW|MEDIUM|HIGH|CRITICAL)")]
    UnknownSeverity(String),
}

/// Raised when an export cannot be produced or written.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export format '{0}' (expected csv|json)")]
    UnsupportedFormat(String),
    #[error("failed to write export to {path}")]
    Destination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize CSV export")]
    Csv(#[from] csv::Error),
    #[error("failed to serialize JSON export")]
    Json(#[from] serde_json::Error),
    #[error("failed to write export")]
    Io(#[from] io::Error),
}
