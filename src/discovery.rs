//! Source discovery: glob expansion, existence partitioning, and
//! project-relative path keys.
//!
//! All baseline and report keys are produced here so every component
//! sees the same spelling: relative to the repo root, forward slashes.

use glob::glob;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid glob pattern '{pattern}': {source}")]
pub struct BadPattern {
    pub pattern: String,
    #[source]
    pub source: glob::PatternError,
}

/// Project-relative, forward-slash-normalized key for a path.
pub fn rel_key(root: &Path, path: &Path) -> String {
    let rel: PathBuf = if path.is_absolute() {
        pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf())
    } else {
        path.to_path_buf()
    };
    let key = rel.to_string_lossy().replace('\\', "/");
    key.strip_prefix("./").unwrap_or(&key).to_string()
}

/// Expand glob patterns under `root` into sorted, deduplicated keys.
///
/// Only plain files are returned; unreadable entries are skipped.
pub fn expand(root: &Path, patterns: &[String]) -> Result<Vec<String>, BadPattern> {
    let mut keys: BTreeSet<String> = BTreeSet::new();
    for pattern in patterns {
        let abs = root.join(pattern).to_string_lossy().to_string();
        let entries = glob(&abs).map_err(|source| BadPattern {
            pattern: pattern.clone(),
            source,
        })?;
        for entry in entries.flatten() {
            if entry.is_file() {
                keys.insert(rel_key(root, &entry));
            }
        }
    }
    Ok(keys.into_iter().collect())
}

/// Split keys into (existing, missing) by checking the filesystem.
pub fn partition(root: &Path, keys: &[String]) -> (Vec<String>, Vec<String>) {
    let mut existing = Vec::new();
    let mut missing = Vec::new();
    for key in keys {
        if root.join(key).is_file() {
            existing.push(key.clone());
        } else {
            missing.push(key.clone());
        }
    }
    (existing, missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_rel_key_normalizes_absolute_paths() {
        let dir = tempdir().unwrap();
        let abs = dir.path().join("src").join("a.tsx");
        assert_eq!(rel_key(dir.path(), &abs), "src/a.tsx");
    }

    #[test]
    fn test_rel_key_keeps_relative_paths() {
        let dir = tempdir().unwrap();
        assert_eq!(rel_key(dir.path(), Path::new("src/a.tsx")), "src/a.tsx");
        assert_eq!(rel_key(dir.path(), Path::new("./src/a.tsx")), "src/a.tsx");
    }

    #[test]
    fn test_expand_collects_sorted_unique_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/nested")).unwrap();
        fs::write(dir.path().join("src/b.tsx"), "").unwrap();
        fs::write(dir.path().join("src/a.ts"), "").unwrap();
        fs::write(dir.path().join("src/nested/c.tsx"), "").unwrap();
        fs::write(dir.path().join("src/skip.css"), "").unwrap();

        let patterns = vec!["src/**/*.ts".to_string(), "src/**/*.tsx".to_string()];
        let keys = expand(dir.path(), &patterns).unwrap();
        assert_eq!(keys, vec!["src/a.ts", "src/b.tsx", "src/nested/c.tsx"]);
    }

    #[test]
    fn test_expand_rejects_bad_pattern() {
        let dir = tempdir().unwrap();
        let err = expand(dir.path(), &["src/***a".to_string()]).unwrap_err();
        assert!(err.to_string().contains("src/***a"));
    }

    #[test]
    fn test_partition_splits_existing_and_missing() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.tsx"), "").unwrap();

        let keys = vec!["src/a.tsx".to_string(), "src/gone.tsx".to_string()];
        let (existing, missing) = partition(dir.path(), &keys);
        assert_eq!(existing, vec!["src/a.tsx"]);
        assert_eq!(missing, vec!["src/gone.tsx"]);
    }
}
