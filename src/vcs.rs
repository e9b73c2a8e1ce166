//! Best-effort version-control staging for the baseline file.

use std::path::Path;
use std::process::Command;

/// Stage `path` with `git add`. Returns false on any failure; staging
/// is never fatal because the file is already correctly on disk.
pub fn stage(repo_root: &Path, path: &Path) -> bool {
    Command::new("git")
        .arg("add")
        .arg(path)
        .current_dir(repo_root)
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_stage_outside_a_repository_fails_softly() {
        let dir = tempdir().unwrap();
        assert!(!stage(dir.path(), Path::new("nonexistent.json")));
    }
}
