//! Concurrency-safe accumulator for per-file diagnostic events.
//!
//! One collector instance exists per invocation. Compile tasks run in
//! parallel (one task per file) and funnel every diagnostic event into
//! `record`; `snapshot` is taken once after the all-complete join.

use crate::models::{DiagnosticKind, DiagnosticSet, FileCounts};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory aggregation of diagnostic events for the current run.
pub struct Collector {
    counts: Mutex<HashMap<String, FileCounts>>,
}

impl Collector {
    pub fn new() -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Increment the count for `(path, kind)` by one.
    ///
    /// Safe to call concurrently from multiple compile tasks. Events
    /// with no file path are dropped; the event producer's contract
    /// allows path-less events.
    pub fn record(&self, path: Option<&str>, kind: DiagnosticKind) {
        let Some(path) = path else { return };
        let mut counts = self
            .counts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *counts
            .entry(path.to_string())
            .or_default()
            .entry(kind)
            .or_insert(0) += 1;
    }

    /// Immutable copy of the accumulated set at call time.
    pub fn snapshot(&self) -> DiagnosticSet {
        let counts = self
            .counts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        counts
            .iter()
            .map(|(path, per_kind)| (path.clone(), per_kind.clone()))
            .collect()
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}
