//! Compiler collaborator: the event-producing interface and the
//! command-backed implementation used by the binary.
//!
//! The engine never invokes a compiler directly; it talks to this
//! trait. Events may interleave across files arbitrarily, but events
//! for one file arrive in that file's own order because each file is
//! compiled by exactly one task.

use crate::models::DiagnosticKind;
use serde::Deserialize;
use serde_json::Value as Json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone)]
/// A single diagnostic event delivered by the compiler.
pub struct CompileEvent {
    pub kind: DiagnosticKind,
    pub line: Option<u64>,
    pub reason: Json,
}

/// The external compiler contract.
pub trait Compiler: Sync {
    /// Compile one file, delivering diagnostic events to `sink`.
    ///
    /// The first sink argument is the file path the event is
    /// attributed to; it may be absent, and such events are ignored
    /// downstream. A crash of the underlying compiler is swallowed
    /// here and surfaces only as absent events, never as an error.
    fn compile(&self, path: &Path, sink: &(dyn Fn(Option<&str>, CompileEvent) + Sync));

    /// Installed compiler version from its package metadata.
    fn version(&self) -> Option<String>;
}

#[derive(Deserialize)]
struct WireEvent {
    kind: DiagnosticKind,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    line: Option<u64>,
    #[serde(default)]
    reason: Json,
}

/// Command-backed compiler: runs a configured program once per file
/// (file path appended as the last argument) and parses one JSON event
/// object per stdout line. Lines that are not valid events are skipped.
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
    repo_root: PathBuf,
    version_file: PathBuf,
}

impl CommandCompiler {
    pub fn new(repo_root: &Path, program: String, args: Vec<String>, version_file: &str) -> Self {
        Self {
            program,
            args,
            repo_root: repo_root.to_path_buf(),
            version_file: repo_root.join(version_file),
        }
    }
}

impl Compiler for CommandCompiler {
    fn compile(&self, path: &Path, sink: &(dyn Fn(Option<&str>, CompileEvent) + Sync)) {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .current_dir(&self.repo_root)
            .output();
        let Ok(output) = output else { return };
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            let Ok(event) = serde_json::from_str::<WireEvent>(line) else {
                continue;
            };
            sink(
                event.filename.as_deref(),
                CompileEvent {
                    kind: event.kind,
                    line: event.line,
                    reason: event.reason,
                },
            );
        }
    }

    fn version(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.version_file).ok()?;
        let pkg: Json = serde_json::from_str(&raw).ok()?;
        pkg.get("version")?.as_str().map(str::to_string)
    }
}
