//! Predicate composition over a catalog.
//!
//! A `Query` is a bundle of optional predicates combined with logical AND;
//! an absent predicate imposes no constraint. Domain checking happens when
//! the query is built (`Query::parse`), never during filtering, so a search
//! with an impossible filter value fails loudly instead of returning an
//! empty result. `search` itself is total: a typed `Query` cannot hold an
//! out-of-domain tactic or severity.

use crate::catalog::{Catalog, Severity, Tactic, Technique};
use crate::error::QueryError;

/// Transient filter bundle, constructed per search invocation.
///
/// The keyword is stored lowercased so matching stays case-insensitive
/// without re-lowering it per record.
#[derive(Clone, Debug, Default)]
pub struct Query {
    keyword: Option<String>,
    tactic: Option<Tactic>,
    severity: Option<Severity>,
    limit: Option<usize>,
}

impl Query {
    /// The empty query; searching with it returns the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from raw filter strings, rejecting out-of-domain
    /// tactic or severity values before any filtering can happen.
    pub fn parse(
        keyword: Option<&str>,
        tactic: Option<&str>,
        severity: Option<&str>,
    ) -> Result<Self, QueryError> {
        let mut query = Query::new();
        if let Some(raw) = keyword {
            query = query.keyword(raw);
        }
        if let Some(raw) = tactic {
            let tactic =
                Tactic::parse(raw).ok_or_else(|| QueryError::UnknownTactic(raw.to_string()))?;
            query = query.tactic(tactic);
        }
        if let Some(raw) = severity {
            let severity =
                Severity::parse(raw).ok_or_else(|| QueryError::UnknownSeverity(raw.to_string()))?;
            query = query.severity(severity);
        }
        Ok(query)
    }

    /// Require the keyword to occur (case-insensitively) in a technique's
    /// name or description.
    pub fn keyword(mut self, keyword: impl AsRef<str>) -> Self {
        self.keyword = Some(keyword.as_ref().to_lowercase());
        self
    }

    /// Require the tactic to be a member of a technique's tactic set.
    pub fn tactic(mut self, tactic: Tactic) -> Self {
        self.tactic = Some(tactic);
        self
    }

    /// Require an exact severity.
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Keep only the first `limit` matches, after filtering.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, technique: &Technique) -> bool {
        if let Some(needle) = &self.keyword {
            if !technique.matches_keyword(needle) {
                return false;
            }
        }
        if let Some(tactic) = self.tactic {
            if !technique.tactics.contains(&tactic) {
                return false;
            }
        }
        if let Some(severity) = self.severity {
            if technique.severity != severity {
                return false;
            }
        }
        true
    }
}

/// Ordered view of the catalog entries matching a query.
///
/// Borrows from the catalog and preserves its order; it never owns, clones,
/// or re-sorts the records.
#[derive(Clone, Debug)]
pub struct ResultSet<'a> {
    entries: Vec<&'a Technique>,
}

impl<'a> ResultSet<'a> {
    pub fn techniques(&self) -> &[&'a Technique] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Technique> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Apply a query to a catalog. Pure filter: catalog order in, catalog order
/// out, no ranking.
pub fn search<'a>(catalog: &'a Catalog, query: &Query) -> ResultSet<'a> {
    let mut entries: Vec<&Technique> = catalog
        .techniques()
        .iter()
        .filter(|technique| query.matches(technique))
        .collect();
    if let Some(limit) = query.limit {
        entries.truncate(limit);
    }
    ResultSet { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawTechnique;

    fn fixture_catalog() -> Catalog {
        let records = vec![
            RawTechnique {
                id: "T1566".to_string(),
                name: "Phishing".to_string(),
                tactics: vec!["TA0001".to_string()],
                severity: "HIGH".to_string(),
                description: "Adversaries may send phishing messages.".to_string(),
            },
            RawTechnique {
                id: "T1059".to_string(),
                name: "Command and Scripting Interpreter".to_string(),
                tactics: vec!["TA0002".to_string()],
                severity: "MEDIUM".to_string(),
                description: "Abuse of PowerShell and other interpreters.".to_string(),
            },
            RawTechnique {
                id: "T1003".to_string(),
                name: "OS Credential Dumping".to_string(),
                tactics: vec!["TA0006".to_string(), "TA0001".to_string()],
                severity: "CRITICAL".to_string(),
                description: "Dumping credentials from the operating system.".to_string(),
            },
        ];
        Catalog::from_records(records).unwrap()
    }

    #[test]
    fn empty_query_is_the_identity() {
        let catalog = fixture_catalog();
        let result = search(&catalog, &Query::new());
        let ids: Vec<_> = result.iter().map(|t| t.id.0.as_str()).collect();
        assert_eq!(ids, ["T1566", "T1059", "T1003"]);
    }

    #[test]
    fn keyword_matches_name_and_description_case_insensitively() {
        let catalog = fixture_catalog();

        let by_name = search(&catalog, &Query::new().keyword("PHISH"));
        let ids: Vec<_> = by_name.iter().map(|t| t.id.0.as_str()).collect();
        assert_eq!(ids, ["T1566"]);

        let by_description = search(&catalog, &Query::new().keyword("powershell"));
        let ids: Vec<_> = by_description.iter().map(|t| t.id.0.as_str()).collect();
        assert_eq!(ids, ["T1059"]);

        assert!(search(&catalog, &Query::new().keyword("no such thing")).is_empty());
    }

    #[test]
    fn tactic_filter_is_set_membership() {
        let catalog = fixture_catalog();
        let result = search(&catalog, &Query::new().tactic(Tactic::InitialAccess));
        let ids: Vec<_> = result.iter().map(|t| t.id.0.as_str()).collect();
        // T1003 belongs to TA0001 as a secondary tactic and must appear.
        assert_eq!(ids, ["T1566", "T1003"]);
        for technique in result.iter() {
            assert!(technique.tactics.contains(&Tactic::InitialAccess));
        }
    }

    #[test]
    fn severity_filter_is_exact() {
        let catalog = fixture_catalog();
        let result = search(&catalog, &Query::new().severity(Severity::Critical));
        let ids: Vec<_> = result.iter().map(|t| t.id.0.as_str()).collect();
        assert_eq!(ids, ["T1003"]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let catalog = fixture_catalog();
        let query = Query::new()
            .keyword("credential")
            .tactic(Tactic::InitialAccess)
            .severity(Severity::Critical);
        let ids: Vec<_> = search(&catalog, &query)
            .iter()
            .map(|t| t.id.0.as_str())
            .collect();
        assert_eq!(ids, ["T1003"]);

        let none = Query::new()
            .keyword("credential")
            .severity(Severity::Low);
        assert!(search(&catalog, &none).is_empty());
    }

    #[test]
    fn limit_truncates_after_filtering() {
        let catalog = fixture_catalog();
        let result = search(&catalog, &Query::new().limit(2));
        let ids: Vec<_> = result.iter().map(|t| t.id.0.as_str()).collect();
        assert_eq!(ids, ["T1566", "T1059"]);

        // Larger than the result set is a no-op.
        assert_eq!(search(&catalog, &Query::new().limit(99)).len(), 3);
    }

    #[test]
    fn parse_rejects_out_of_domain_values_before_filtering() {
        let err = Query::parse(None, None, Some("CRITICO")).unwrap_err();
        assert!(matches!(err, QueryError::UnknownSeverity(ref v) if v == "CRITICO"));

        let err = Query::parse(None, Some("TA9999"), None).unwrap_err();
        assert!(matches!(err, QueryError::UnknownTactic(ref v) if v == "TA9999"));

        let query = Query::parse(Some("phish"), Some("TA0001"), Some("high")).unwrap();
        let catalog = fixture_catalog();
        let ids: Vec<_> = search(&catalog, &query)
            .iter()
            .map(|t| t.id.0.as_str())
            .collect();
        assert_eq!(ids, ["T1566"]);
    }
}
