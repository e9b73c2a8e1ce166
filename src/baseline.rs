//! Durable persistence for the diagnostic baseline.
//!
//! The on-disk form is canonical: file keys sorted lexicographically,
//! 2-space indentation, trailing newline. Identical inputs always
//! produce byte-identical output, which keeps the file diff-friendly
//! under version control.
//!
//! Loading fails softly. A missing file is the expected first-run
//! state; an unreadable or schema-mismatched file is reported as
//! `Corrupt` and the caller proceeds as if no baseline existed, so a
//! damaged file never blocks the tool.

use crate::models::baseline::{Baseline, RECORD_VERSION};
use crate::models::{DiagnosticSet, FileCounts};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Result of attempting to read a baseline file.
pub enum LoadOutcome {
    Loaded(Baseline),
    Missing,
    Corrupt(String),
}

/// Read and schema-check the baseline at `path`.
pub fn load(path: &Path) -> LoadOutcome {
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadOutcome::Missing,
        Err(e) => return LoadOutcome::Corrupt(e.to_string()),
    };
    let record: Baseline = match serde_json::from_str(&raw) {
        Ok(r) => r,
        Err(e) => return LoadOutcome::Corrupt(e.to_string()),
    };
    if record.record_version != RECORD_VERSION {
        return LoadOutcome::Corrupt(format!(
            "unsupported recordVersion {} (expected {})",
            record.record_version, RECORD_VERSION
        ));
    }
    LoadOutcome::Loaded(record)
}

/// Merge freshly collected diagnostics into an existing file map.
///
/// Starts from `existing` (empty for rebuild runs). For every path in
/// scope: a non-empty zero-filtered entry in `new` replaces any prior
/// one; no entry (or an all-zero entry) deletes the path. Paths outside
/// the scope are left untouched, which is how partial runs avoid
/// clobbering unrelated entries.
pub fn merge(
    existing: Option<&DiagnosticSet>,
    in_scope: &[String],
    new: &DiagnosticSet,
) -> DiagnosticSet {
    let mut files = existing.cloned().unwrap_or_default();
    for path in in_scope {
        match new.get(path).map(strip_zero).filter(|c| !c.is_empty()) {
            Some(counts) => {
                files.insert(path.clone(), counts);
            }
            None => {
                files.remove(path);
            }
        }
    }
    files
}

fn strip_zero(counts: &FileCounts) -> FileCounts {
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(kind, count)| (*kind, *count))
        .collect()
}

/// Canonical serialized form of a record, including trailing newline.
pub fn render(record: &Baseline) -> serde_json::Result<String> {
    let mut body = serde_json::to_string_pretty(record)?;
    body.push('\n');
    Ok(body)
}

/// Merge and persist the baseline atomically.
///
/// `compiler_version` of `None` records the "unknown" sentinel. The
/// write goes through a temp file in the target directory followed by
/// a rename, so a crash mid-write never leaves a truncated baseline.
pub fn save(
    path: &Path,
    in_scope: &[String],
    new: &DiagnosticSet,
    existing: Option<&DiagnosticSet>,
    compiler_version: Option<String>,
) -> io::Result<()> {
    let files = merge(existing, in_scope, new);
    let record = Baseline::new(compiler_version, files);
    let body = render(&record).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    write_atomic(path, &body)
}

fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "baseline".to_string());
    let tmp = parent.join(format!(".{}.tmp.{}", name, std::process::id()));
    let mut file = fs::File::create(&tmp)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}
