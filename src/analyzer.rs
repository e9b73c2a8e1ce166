//! Regression analyzer: classifies per-file total-count changes.
//!
//! Comparison is on a file's total across all diagnostic kinds, so an
//! increase in one kind offset by a decrease in another nets out. Only
//! files inside the given scope are compared.

use crate::models::{total, DiagnosticSet};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Default, Serialize)]
/// Classified per-file deltas between a baseline and a fresh run.
pub struct DiffReport {
    pub increases: BTreeMap<String, u64>,
    pub decreases: BTreeMap<String, u64>,
}

impl DiffReport {
    pub fn is_clean(&self) -> bool {
        self.increases.is_empty() && self.decreases.is_empty()
    }

    pub fn has_regressions(&self) -> bool {
        !self.increases.is_empty()
    }
}

/// Compare totals between `existing` and `new` for every path in scope.
///
/// Files where both totals are zero (absent, or present with all-zero
/// counts) produce no entry in either map.
pub fn diff(paths: &[String], existing: &DiagnosticSet, new: &DiagnosticSet) -> DiffReport {
    let mut report = DiffReport::default();
    for path in paths {
        let before = total(existing.get(path));
        let after = total(new.get(path));
        if before == 0 && after == 0 {
            continue;
        }
        if after > before {
            report.increases.insert(path.clone(), after - before);
        } else if after < before {
            report.decreases.insert(path.clone(), before - after);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiagnosticKind, FileCounts};

    fn set(entries: &[(&str, &[(DiagnosticKind, u64)])]) -> DiagnosticSet {
        entries
            .iter()
            .map(|(path, counts)| {
                let per_kind: FileCounts = counts.iter().copied().collect();
                (path.to_string(), per_kind)
            })
            .collect()
    }

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_new_diagnostics_on_empty_baseline() {
        let existing = DiagnosticSet::new();
        let new = set(&[("a.ts", &[(DiagnosticKind::CompileError, 1)])]);
        let report = diff(&paths(&["a.ts"]), &existing, &new);
        assert_eq!(report.increases["a.ts"], 1);
        assert!(report.decreases.is_empty());
    }

    #[test]
    fn test_decrease_against_baseline() {
        let existing = set(&[("a.ts", &[(DiagnosticKind::CompileError, 3)])]);
        let new = set(&[("a.ts", &[(DiagnosticKind::CompileError, 1)])]);
        let report = diff(&paths(&["a.ts"]), &existing, &new);
        assert!(report.increases.is_empty());
        assert_eq!(report.decreases["a.ts"], 2);
    }

    #[test]
    fn test_equal_totals_produce_no_entry() {
        let existing = set(&[("a.ts", &[(DiagnosticKind::CompileError, 2)])]);
        let new = set(&[("a.ts", &[(DiagnosticKind::CompileError, 2)])]);
        let report = diff(&paths(&["a.ts"]), &existing, &new);
        assert!(report.is_clean());
    }

    #[test]
    fn test_cross_kind_changes_net_out() {
        // One error became a skip: total unchanged, no entry.
        let existing = set(&[(
            "a.ts",
            &[
                (DiagnosticKind::CompileError, 2),
                (DiagnosticKind::CompileSkip, 1),
            ],
        )]);
        let new = set(&[(
            "a.ts",
            &[
                (DiagnosticKind::CompileError, 1),
                (DiagnosticKind::CompileSkip, 2),
            ],
        )]);
        let report = diff(&paths(&["a.ts"]), &existing, &new);
        assert!(report.is_clean());
    }

    #[test]
    fn test_zero_count_entry_matches_absent() {
        let existing = set(&[("a.ts", &[(DiagnosticKind::CompileError, 0)])]);
        let new = DiagnosticSet::new();
        let report = diff(&paths(&["a.ts"]), &existing, &new);
        assert!(report.is_clean());
    }

    #[test]
    fn test_files_outside_scope_are_ignored() {
        let existing = set(&[("b.ts", &[(DiagnosticKind::CompileError, 5)])]);
        let new = set(&[("b.ts", &[(DiagnosticKind::CompileError, 9)])]);
        let report = diff(&paths(&["a.ts"]), &existing, &new);
        assert!(report.is_clean());
    }

    #[test]
    fn test_mixed_scope() {
        let existing = set(&[
            ("a.ts", &[(DiagnosticKind::CompileError, 1)]),
            ("b.ts", &[(DiagnosticKind::PipelineError, 2)]),
        ]);
        let new = set(&[
            ("a.ts", &[(DiagnosticKind::CompileError, 4)]),
            ("c.ts", &[(DiagnosticKind::CompileSkip, 1)]),
        ]);
        let report = diff(&paths(&["a.ts", "b.ts", "c.ts"]), &existing, &new);
        assert_eq!(report.increases["a.ts"], 3);
        assert_eq!(report.increases["c.ts"], 1);
        assert_eq!(report.decreases["b.ts"], 2);
    }
}
