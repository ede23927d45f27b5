//! Plain-text table rendering for interactive display.
//!
//! Presentation only: long names and descriptions are elided with a `…`
//! marker in the rendered text, the underlying records are untouched. The
//! caller decides where the text goes; nothing here writes to a terminal.

use crate::query::ResultSet;

const NAME_MAX_CHARS: usize = 40;
const DESCRIPTION_MAX_CHARS: usize = 60;
const ELLIPSIS: &str = "\u{2026}";

const HEADERS: [&str; 5] = ["ID", "NAME", "TACTICS", "SEVERITY", "DESCRIPTION"];

/// Message emitted instead of a table when nothing matched.
pub const NO_RESULTS: &str = "No techniques matched the query.";

/// Render a result set as a bounded-width table.
///
/// Column widths adapt to the content up to the per-column caps, so the
/// output stays readable for both terse and verbose catalogs. An empty
/// result set renders the explicit [`NO_RESULTS`] line rather than a bare
/// header.
pub fn render(result: &ResultSet<'_>) -> String {
    if result.is_empty() {
        return format!("{NO_RESULTS}\n");
    }

    let rows: Vec<[String; 5]> = result
        .iter()
        .map(|technique| {
            let tactics = technique
                .tactics
                .iter()
                .map(|tactic| tactic.code())
                .collect::<Vec<_>>()
                .join(", ");
            [
                technique.id.0.clone(),
                truncate(&technique.name, NAME_MAX_CHARS),
                tactics,
                technique.severity.as_str().to_string(),
                truncate(&technique.description, DESCRIPTION_MAX_CHARS),
            ]
        })
        .collect();

    let mut widths: [usize; 5] = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: [String; 5] = widths.map(|w| "-".repeat(w));
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    for (idx, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if idx > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        // The last column is left ragged; padding it would only add
        // trailing whitespace.
        if idx < cells.len() - 1 {
            for _ in cell.chars().count()..*width {
                out.push(' ');
            }
        }
    }
    out.push('\n');
}

fn truncate(text: &str, max_chars: usize) -> String {
    let mut acc = String::new();
    for (idx, ch) in text.chars().enumerate() {
        if idx >= max_chars {
            acc.push_str(ELLIPSIS);
            return acc;
        }
        acc.push(ch);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, RawTechnique};
    use crate::query::{Query, search};

    fn catalog_with_description(description: &str) -> Catalog {
        Catalog::from_records(vec![RawTechnique {
            id: "T1566".to_string(),
            name: "Phishing".to_string(),
            tactics: vec!["TA0001".to_string(), "TA0043".to_string()],
            severity: "HIGH".to_string(),
            description: description.to_string(),
        }])
        .unwrap()
    }

    #[test]
    fn empty_result_renders_explicit_message() {
        let catalog = Catalog::from_records(vec![]).unwrap();
        let result = search(&catalog, &Query::new());
        assert_eq!(render(&result), format!("{NO_RESULTS}\n"));
    }

    #[test]
    fn table_has_header_rule_and_one_row_per_technique() {
        let catalog = catalog_with_description("Adversaries may send phishing messages.");
        let result = search(&catalog, &Query::new());
        let text = render(&result);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].contains("SEVERITY"));
        assert!(lines[1].starts_with("--"));
        assert!(lines[2].starts_with("T1566"));
        assert!(lines[2].contains("HIGH"));
        // Tactic set renders in kill-chain order, joined for display.
        assert!(lines[2].contains("TA0043, TA0001"));
    }

    #[test]
    fn long_descriptions_are_elided_without_mutating_the_record() {
        let long = "x".repeat(500);
        let catalog = catalog_with_description(&long);
        let result = search(&catalog, &Query::new());
        let text = render(&result);
        assert!(text.contains(ELLIPSIS));
        assert!(!text.contains(&long));
        // Display truncation never touches the stored record.
        assert_eq!(catalog.techniques()[0].description.len(), 500);
    }

    #[test]
    fn truncate_is_char_based() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), format!("abc{ELLIPSIS}"));
        // Multi-byte characters count as one.
        assert_eq!(truncate("ééééé", 5), "ééééé");
    }
}
