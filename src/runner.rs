//! Lifecycle orchestrator: sequences discovery, the parallel compile
//! fan-out, baseline comparison, and persistence per invocation mode.
//!
//! Modes:
//! - `check`: compile the scope, diff against the baseline, never write.
//! - `update`: like check, but commit the collected state back into the
//!   baseline when the gate passes; a regression halts without writing.
//! - `rebuild`: recompute the baseline from scratch, discarding prior
//!   entries.
//!
//! The engine returns typed outcomes; deciding process exit codes is
//! the binary's job.

use crate::analyzer::{self, DiffReport};
use crate::baseline::{self, LoadOutcome};
use crate::collector::Collector;
use crate::compiler::Compiler;
use crate::config::Effective;
use crate::discovery::{self, BadPattern};
use crate::models::{DiagnosticSet, FileDelta, RunOutcome};
use crate::vcs;
use rayon::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("requested files do not exist: {}", .0.join(", "))]
    MissingFiles(Vec<String>),
    #[error(transparent)]
    Pattern(#[from] BadPattern),
    #[error("failed to write baseline '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// What one invocation observed and did.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub report: DiffReport,
    pub files_checked: usize,
    pub baseline_written: bool,
}

/// Compile the scope and diff against the baseline without writing.
///
/// Explicitly requested paths that do not exist are fatal here, before
/// any compilation starts.
pub fn run_check(
    eff: &Effective,
    compiler: &dyn Compiler,
    explicit: &[String],
) -> Result<(RunReport, Vec<String>), RunError> {
    let mut warnings = Vec::new();
    let scope = if explicit.is_empty() {
        discovery::expand(&eff.repo_root, &eff.patterns)?
    } else {
        let keys = normalize_explicit(&eff.repo_root, explicit);
        let (existing, missing) = discovery::partition(&eff.repo_root, &keys);
        if !missing.is_empty() {
            return Err(RunError::MissingFiles(missing));
        }
        existing
    };

    let collected = compile_all(eff, compiler, &scope);
    let existing = load_existing(eff, &mut warnings);
    let report = analyzer::diff(&scope, &existing, &collected);
    let outcome = outcome_of(&report);
    Ok((
        RunReport {
            outcome,
            report,
            files_checked: scope.len(),
            baseline_written: false,
        },
        warnings,
    ))
}

/// Compile the scope, gate on regressions, and merge the results into
/// the baseline when the gate passes.
///
/// Missing requested paths are not fatal here; they join the save scope
/// so their stale entries prune. Baseline entries whose files no longer
/// exist on disk are pruned the same way.
pub fn run_update(
    eff: &Effective,
    compiler: &dyn Compiler,
    explicit: &[String],
) -> Result<(RunReport, Vec<String>), RunError> {
    let mut warnings = Vec::new();
    let (scope, missing) = if explicit.is_empty() {
        (discovery::expand(&eff.repo_root, &eff.patterns)?, Vec::new())
    } else {
        let keys = normalize_explicit(&eff.repo_root, explicit);
        discovery::partition(&eff.repo_root, &keys)
    };

    let collected = compile_all(eff, compiler, &scope);
    let existing = load_existing(eff, &mut warnings);
    let report = analyzer::diff(&scope, &existing, &collected);

    if report.has_regressions() {
        // Halt without touching the baseline; the gate failed.
        let outcome = outcome_of(&report);
        return Ok((
            RunReport {
                outcome,
                report,
                files_checked: scope.len(),
                baseline_written: false,
            },
            warnings,
        ));
    }

    // Prune entries for files deleted from disk, plus requested paths
    // that turned out to be missing.
    let deleted: Vec<String> = existing
        .keys()
        .filter(|key| !eff.repo_root.join(key).is_file())
        .cloned()
        .collect();
    let mut in_scope = scope.clone();
    in_scope.extend(missing);
    in_scope.extend(deleted);

    persist(eff, &in_scope, &collected, Some(&existing), compiler, &mut warnings)?;
    let outcome = outcome_of(&report);
    Ok((
        RunReport {
            outcome,
            report,
            files_checked: scope.len(),
            baseline_written: true,
        },
        warnings,
    ))
}

/// Recompute the baseline from scratch for the configured patterns.
pub fn run_rebuild(
    eff: &Effective,
    compiler: &dyn Compiler,
) -> Result<(RunReport, Vec<String>), RunError> {
    let mut warnings = Vec::new();
    let scope = discovery::expand(&eff.repo_root, &eff.patterns)?;
    let collected = compile_all(eff, compiler, &scope);
    persist(eff, &scope, &collected, None, compiler, &mut warnings)?;
    Ok((
        RunReport {
            outcome: RunOutcome::Clean,
            report: DiffReport::default(),
            files_checked: scope.len(),
            baseline_written: true,
        },
        warnings,
    ))
}

fn normalize_explicit(root: &Path, explicit: &[String]) -> Vec<String> {
    explicit
        .iter()
        .map(|p| discovery::rel_key(root, Path::new(p)))
        .collect()
}

/// One compile task per file; events funnel into a run-scoped collector.
fn compile_all(eff: &Effective, compiler: &dyn Compiler, scope: &[String]) -> DiagnosticSet {
    let collector = Collector::new();
    scope.par_iter().for_each(|key| {
        let abs = eff.repo_root.join(key);
        compiler.compile(&abs, &|path, event| {
            let key = path.map(|p| discovery::rel_key(&eff.repo_root, Path::new(p)));
            collector.record(key.as_deref(), event.kind);
        });
    });
    collector.snapshot()
}

fn load_existing(eff: &Effective, warnings: &mut Vec<String>) -> DiagnosticSet {
    match baseline::load(&eff.repo_root.join(&eff.baseline)) {
        LoadOutcome::Loaded(record) => record.files,
        LoadOutcome::Missing => DiagnosticSet::new(),
        LoadOutcome::Corrupt(reason) => {
            warnings.push(format!(
                "Baseline '{}' is unreadable ({reason}); treating it as empty.",
                eff.baseline
            ));
            DiagnosticSet::new()
        }
    }
}

fn persist(
    eff: &Effective,
    in_scope: &[String],
    collected: &DiagnosticSet,
    existing: Option<&DiagnosticSet>,
    compiler: &dyn Compiler,
    warnings: &mut Vec<String>,
) -> Result<(), RunError> {
    let path = eff.repo_root.join(&eff.baseline);
    baseline::save(&path, in_scope, collected, existing, compiler.version()).map_err(|source| {
        RunError::Write {
            path: eff.baseline.clone(),
            source,
        }
    })?;
    if eff.stage && !vcs::stage(&eff.repo_root, &path) {
        warnings.push(format!(
            "Failed to stage '{}'; the file is written but not added to the index.",
            eff.baseline
        ));
    }
    Ok(())
}

fn outcome_of(report: &DiffReport) -> RunOutcome {
    let deltas = |map: &std::collections::BTreeMap<String, u64>| {
        map.iter()
            .map(|(file, delta)| FileDelta {
                file: file.clone(),
                delta: *delta,
            })
            .collect()
    };
    if !report.increases.is_empty() {
        RunOutcome::Regressed(deltas(&report.increases))
    } else if !report.decreases.is_empty() {
        RunOutcome::Improved(deltas(&report.decreases))
    } else {
        RunOutcome::Clean
    }
}
