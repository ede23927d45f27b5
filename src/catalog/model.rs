//! Technique records and the validated, immutable catalog.
//!
//! `RawTechnique` is the untrusted input shape (plain strings for severity
//! and tactics); `Catalog::from_records` is the only way to turn raw entries
//! into `Technique` values, so every catalog that exists has passed the full
//! set of invariants: non-empty id and name, unique ids, severity and tactics
//! inside their known domains.

use crate::catalog::identity::{Severity, Tactic, TechniqueId};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One technique entry as supplied by an external source, before validation.
#[derive(Clone, Debug, Deserialize)]
pub struct RawTechnique {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tactics: Vec<String>,
    pub severity: String,
    #[serde(default)]
    pub description: String,
}

/// One validated catalog entry.
///
/// Field order is the export key order; exporters rely on it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Technique {
    pub id: TechniqueId,
    pub name: String,
    pub tactics: BTreeSet<Tactic>,
    pub severity: Severity,
    pub description: String,
}

impl Technique {
    /// True when `needle` (already lowercased) occurs in the name or
    /// description, ignoring case.
    pub(crate) fn matches_keyword(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Immutable ordered collection of techniques with a derived id index.
///
/// Built once via [`Catalog::from_records`]; read-only afterwards. Input
/// order is preserved and defines result order for every search.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<Technique>,
    by_id: BTreeMap<TechniqueId, usize>,
}

impl Catalog {
    /// Validate raw entries and build the catalog.
    ///
    /// All-or-nothing: the first violation aborts the load and no partial
    /// catalog escapes.
    pub fn from_records(records: Vec<RawTechnique>) -> Result<Self, ValidationError> {
        let mut entries = Vec::with_capacity(records.len());
        let mut by_id = BTreeMap::new();

        for (index, raw) in records.into_iter().enumerate() {
            let id = raw.id.trim();
            if id.is_empty() {
                return Err(ValidationError::EmptyId { index });
            }
            let id = TechniqueId(id.to_string());

            if raw.name.trim().is_empty() {
                return Err(ValidationError::EmptyName { id: id.0 });
            }

            let severity = Severity::parse(&raw.severity).ok_or_else(|| {
                ValidationError::UnknownSeverity {
                    id: id.0.clone(),
                    value: raw.severity.clone(),
                }
            })?;

            let mut tactics = BTreeSet::new();
            for value in &raw.tactics {
                let tactic =
                    Tactic::parse(value).ok_or_else(|| ValidationError::UnknownTactic {
                        id: id.0.clone(),
                        value: value.clone(),
                    })?;
                tactics.insert(tactic);
            }

            if by_id.contains_key(&id) {
                return Err(ValidationError::DuplicateId { id: id.0 });
            }
            by_id.insert(id.clone(), entries.len());
            entries.push(Technique {
                id,
                name: raw.name,
                tactics,
                severity,
                description: raw.description,
            });
        }

        Ok(Self { entries, by_id })
    }

    /// All techniques in load order.
    pub fn techniques(&self) -> &[Technique] {
        &self.entries
    }

    /// Resolve a technique by id.
    pub fn get(&self, id: &TechniqueId) -> Option<&Technique> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// Technique ids in load order.
    pub fn ids(&self) -> impl Iterator<Item = &TechniqueId> {
        self.entries.iter().map(|tech| &tech.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
