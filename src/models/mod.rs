//! Shared data models for diagnostic counts and run outcomes.

pub mod baseline;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Category of a single diagnostic event reported by the compiler.
pub enum DiagnosticKind {
    CompileError,
    CompileSkip,
    PipelineError,
}

/// Per-kind counts for one file. Absent key means zero.
pub type FileCounts = BTreeMap<DiagnosticKind, u64>;

/// Per-file diagnostic counts keyed by project-relative path.
///
/// BTreeMap keys give the canonical lexicographic order required for
/// stable persistence.
pub type DiagnosticSet = BTreeMap<String, FileCounts>;

/// Sum of all kind counts for a file; 0 when the entry is absent.
pub fn total(counts: Option<&FileCounts>) -> u64 {
    counts.map(|c| c.values().sum()).unwrap_or(0)
}

#[derive(Debug, Clone, Serialize)]
/// A per-file change in total diagnostic count.
pub struct FileDelta {
    pub file: String,
    pub delta: u64,
}

#[derive(Debug, Clone)]
/// Gate decision for one run. Exit-code mapping belongs to the binary.
pub enum RunOutcome {
    Clean,
    Regressed(Vec<FileDelta>),
    Improved(Vec<FileDelta>),
}

impl RunOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            RunOutcome::Clean => "clean",
            RunOutcome::Regressed(_) => "regressed",
            RunOutcome::Improved(_) => "improved-or-clean",
        }
    }

    pub fn is_regressed(&self) -> bool {
        matches!(self, RunOutcome::Regressed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_of_absent_entry_is_zero() {
        assert_eq!(total(None), 0);
    }

    #[test]
    fn test_total_sums_across_kinds() {
        let mut counts = FileCounts::new();
        counts.insert(DiagnosticKind::CompileError, 2);
        counts.insert(DiagnosticKind::PipelineError, 1);
        assert_eq!(total(Some(&counts)), 3);
    }

    #[test]
    fn test_kind_order_matches_serialized_names() {
        // Declaration order coincides with lexicographic order of the
        // serialized names, so sorted maps stay sorted on disk.
        let mut kinds = vec![
            DiagnosticKind::PipelineError,
            DiagnosticKind::CompileError,
            DiagnosticKind::CompileSkip,
        ];
        kinds.sort();
        let names: Vec<String> = kinds
            .iter()
            .map(|k| serde_json::to_string(k).unwrap())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
