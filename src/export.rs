//! Serialization of result sets to CSV or JSON.
//!
//! The exporter is a pure transformation plus a single write: it serializes
//! exactly the result set it is given, in order, to whichever sink the caller
//! supplies. It never filters, never retries, and has no file-naming policy
//! of its own. Output is deterministic: identical input produces
//! byte-identical output across runs.

use crate::catalog::Technique;
use crate::error::ExportError;
use crate::query::ResultSet;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Separator used to join multiple tactic codes inside the single CSV
/// `tactics` field.
pub const TACTIC_SEPARATOR: &str = ";";

const CSV_HEADER: [&str; 5] = ["id", "name", "tactics", "severity", "description"];

/// Supported export formats. The set is closed; dispatch is a match, not a
/// trait object.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Resolve a format tag, case-insensitively. Unknown tags are an
    /// [`ExportError`], not a default.
    pub fn parse(value: &str) -> Result<Self, ExportError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize a result set into `writer`.
///
/// CSV carries a fixed header row and one row per technique, with standard
/// quoting for embedded delimiters, quotes, and newlines; the tactic set is
/// joined with [`TACTIC_SEPARATOR`] inside its field. JSON is a
/// pretty-printed array of objects with keys in the order `id`, `name`,
/// `tactics`, `severity`, `description`.
pub fn export<W: Write>(
    result: &ResultSet<'_>,
    format: ExportFormat,
    writer: &mut W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => export_csv(result, writer),
        ExportFormat::Json => export_json(result, writer),
    }
}

/// Serialize a result set into a freshly created file at `path`.
///
/// Creation failures (permissions, missing parent directory) surface as
/// [`ExportError::Destination`] naming the path; nothing is retried.
pub fn export_to_path(
    result: &ResultSet<'_>,
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Destination {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    export(result, format, &mut writer)?;
    writer.flush().map_err(|source| ExportError::Destination {
        path: path.to_path_buf(),
        source,
    })
}

fn export_csv<W: Write>(result: &ResultSet<'_>, writer: &mut W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for technique in result.iter() {
        let tactics = joined_tactics(technique);
        csv_writer.write_record([
            technique.id.0.as_str(),
            technique.name.as_str(),
            tactics.as_str(),
            technique.severity.as_str(),
            technique.description.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn export_json<W: Write>(result: &ResultSet<'_>, writer: &mut W) -> Result<(), ExportError> {
    let records: Vec<&Technique> = result.iter().collect();
    serde_json::to_writer_pretty(&mut *writer, &records)?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn joined_tactics(technique: &Technique) -> String {
    technique
        .tactics
        .iter()
        .map(|tactic| tactic.code())
        .collect::<Vec<_>>()
        .join(TACTIC_SEPARATOR)
}
