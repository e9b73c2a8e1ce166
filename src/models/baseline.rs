//! Baseline record schema: the persisted per-file diagnostic snapshot.

use super::DiagnosticSet;
use serde::{Deserialize, Serialize};

/// Schema version written into every baseline record.
pub const RECORD_VERSION: u32 = 1;

/// Sentinel used when the compiler version cannot be determined.
pub const UNKNOWN_VERSION: &str = "unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
/// The durable snapshot owned by the baseline store.
///
/// Field order here is serialization order: `recordVersion` first, then
/// the compiler version, then the sorted `files` map.
pub struct Baseline {
    #[serde(rename = "recordVersion")]
    pub record_version: u32,
    #[serde(rename = "react-compiler-version")]
    pub compiler_version: String,
    #[serde(default)]
    pub files: DiagnosticSet,
}

impl Baseline {
    /// Build a record at the current schema version.
    pub fn new(compiler_version: Option<String>, files: DiagnosticSet) -> Self {
        Self {
            record_version: RECORD_VERSION,
            compiler_version: compiler_version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
            files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiagnosticKind, FileCounts};

    #[test]
    fn test_serialized_field_names() {
        let mut counts = FileCounts::new();
        counts.insert(DiagnosticKind::CompileError, 1);
        let mut files = DiagnosticSet::new();
        files.insert("src/a.tsx".to_string(), counts);
        let record = Baseline::new(Some("19.0.0".to_string()), files);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["recordVersion"], 1);
        assert_eq!(json["react-compiler-version"], "19.0.0");
        assert_eq!(json["files"]["src/a.tsx"]["CompileError"], 1);
    }

    #[test]
    fn test_missing_version_uses_sentinel() {
        let record = Baseline::new(None, DiagnosticSet::new());
        assert_eq!(record.compiler_version, UNKNOWN_VERSION);
    }
}
