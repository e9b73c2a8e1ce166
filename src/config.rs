//! Configuration discovery and effective settings resolution.
//!
//! Redline reads `redline.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config.
//! Defaults:
//! - `baseline`: `redline.baseline.json`
//! - `output`: `human`
//! - `patterns`: `src/**/*.{ts,tsx,js,jsx}` (one pattern per extension)
//! - `stage`: true
//! - `[compiler].versionFile`: `node_modules/babel-plugin-react-compiler/package.json`
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Compiler collaborator settings under `[compiler]`.
pub struct CompilerCfg {
    /// Program run once per file; must emit one JSON event per stdout line.
    pub command: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
    /// Package metadata file the installed version is read from.
    #[serde(rename = "versionFile")]
    pub version_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `redline.toml|yaml`.
pub struct RedlineConfig {
    pub baseline: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub patterns: Option<Vec<String>>,
    /// Stage the baseline file with git after a successful write.
    pub stage: Option<bool>,
    #[serde(default)]
    pub compiler: Option<CompilerCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub baseline: String,
    pub output: String,
    pub patterns: Vec<String>,
    pub stage: bool,
    pub compiler_command: Option<String>,
    pub compiler_args: Vec<String>,
    pub version_file: String,
}

impl Effective {
    pub fn compiler_configured(&self) -> bool {
        self.compiler_command.is_some()
    }
}

fn default_patterns() -> Vec<String> {
    ["src/**/*.ts", "src/**/*.tsx", "src/**/*.js", "src/**/*.jsx"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `redline.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("redline.toml").exists()
            || cur.join("redline.yaml").exists()
            || cur.join("redline.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `RedlineConfig` from `redline.toml` or `redline.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<RedlineConfig> {
    let toml_path = root.join("redline.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: RedlineConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["redline.yaml", "redline.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: RedlineConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_baseline: Option<&str>,
    cli_output: Option<&str>,
    cli_compiler: Option<&str>,
    cli_stage: Option<bool>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let baseline = cli_baseline
        .map(|s| s.to_string())
        .or(cfg.baseline)
        .unwrap_or_else(|| "redline.baseline.json".to_string());

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let patterns = cfg.patterns.unwrap_or_else(default_patterns);

    let stage = cli_stage.or(cfg.stage).unwrap_or(true);

    let compiler_command = cli_compiler
        .map(|s| s.to_string())
        .or_else(|| cfg.compiler.as_ref().and_then(|c| c.command.clone()));
    let compiler_args = cfg
        .compiler
        .as_ref()
        .and_then(|c| c.args.clone())
        .unwrap_or_default();
    let version_file = cfg
        .compiler
        .as_ref()
        .and_then(|c| c.version_file.clone())
        .unwrap_or_else(|| "node_modules/babel-plugin-react-compiler/package.json".to_string());

    Effective {
        repo_root,
        baseline,
        output,
        patterns,
        stage,
        compiler_command,
        compiler_args,
        version_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("redline.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
baseline = "ci/redline.json"
output = "json"
patterns = ["lib/**/*.ts"]
[compiler]
command = "node"
args = ["scripts/compile-one.mjs"]
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), None, None, None, None);
        assert_eq!(eff.baseline, "ci/redline.json");
        assert_eq!(eff.output, "json");
        assert_eq!(eff.patterns, vec!["lib/**/*.ts"]);
        assert_eq!(eff.compiler_command.as_deref(), Some("node"));
        assert_eq!(eff.compiler_args, vec!["scripts/compile-one.mjs"]);
        assert!(eff.stage);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("redline.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output: human
compiler:
  command: node
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None, None);
        assert_eq!(eff.baseline, "redline.baseline.json");
        assert_eq!(eff.output, "human");
        assert_eq!(eff.patterns, default_patterns());
        assert_eq!(
            eff.version_file,
            "node_modules/babel-plugin-react-compiler/package.json"
        );
    }

    #[test]
    fn test_cli_takes_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("redline.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
baseline = "from-config.json"
output = "json"
stage = true
[compiler]
command = "node"
            "#
        )
        .unwrap();

        let eff = resolve_effective(
            root.to_str(),
            Some("from-cli.json"),
            Some("human"),
            Some("deno"),
            Some(false),
        );
        assert_eq!(eff.baseline, "from-cli.json");
        assert_eq!(eff.output, "human");
        assert_eq!(eff.compiler_command.as_deref(), Some("deno"));
        assert!(!eff.stage);
    }

    #[test]
    fn test_compiler_unconfigured_without_config_or_flag() {
        let dir = tempdir().unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None, None, None);
        assert!(!eff.compiler_configured());
    }
}
