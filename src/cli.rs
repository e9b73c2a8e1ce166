//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "redline",
    version,
    about = "Compiler diagnostics regression gate",
    long_about = "Redline — track compiler diagnostic counts per file and fail only when a file regresses against the committed baseline.\n\nConfiguration precedence: CLI > redline.toml > defaults.",
    after_help = "Examples:\n  redline check\n  redline check src/App.tsx src/hooks/useData.ts\n  redline update --output json\n  redline rebuild --no-stage",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for checking and maintaining the baseline.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current redline version.")]
    Version,
    /// Compare the current diagnostics against the baseline
    #[command(
        about = "Run the regression gate",
        long_about = "Compile the scoped files, compare per-file diagnostic totals against the baseline, and fail when any file regresses. Never writes the baseline.",
        after_help = "Examples:\n  redline check\n  redline check src/App.tsx --output json"
    )]
    Check {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Baseline file path relative to the root")]
        baseline: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Compiler command emitting one JSON event per stdout line")]
        compiler: Option<String>,
        #[arg(help = "Explicit files to check (default: configured patterns)")]
        paths: Vec<String>,
    },
    /// Merge current diagnostics into the baseline when the gate passes
    #[command(
        about = "Update the baseline",
        long_about = "Compile the scoped files and merge the results into the baseline. A regression halts the run without writing. Entries for deleted files are pruned.",
        after_help = "Examples:\n  redline update\n  redline update src/App.tsx --no-stage"
    )]
    Update {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Baseline file path relative to the root")]
        baseline: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Compiler command emitting one JSON event per stdout line")]
        compiler: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Skip git staging of the written baseline")]
        no_stage: bool,
        #[arg(help = "Explicit files to update (default: configured patterns)")]
        paths: Vec<String>,
    },
    /// Rebuild the baseline from scratch
    #[command(
        about = "Rebuild the baseline",
        long_about = "Recompute the baseline for all configured patterns, discarding prior entries. Skips the regression gate.",
        after_help = "Examples:\n  redline rebuild\n  redline rebuild --no-stage"
    )]
    Rebuild {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Baseline file path relative to the root")]
        baseline: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Compiler command emitting one JSON event per stdout line")]
        compiler: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Skip git staging of the written baseline")]
        no_stage: bool,
    },
}
