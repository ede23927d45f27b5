//! Technique catalog wiring.
//!
//! `identity` holds the closed-domain value types (ids, tactics, severity);
//! `model` holds the record shapes and the validated `Catalog`. Callers build
//! a catalog once at startup via `Catalog::from_records` (or the file helper
//! in the crate root) and pass it by reference into the query, render, and
//! export layers.

pub mod identity;
pub mod model;

pub use identity::{Severity, Tactic, TechniqueId};
pub use model::{Catalog, RawTechnique, Technique};
