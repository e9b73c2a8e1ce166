//! Redline CLI binary entry point.
//! Delegates to the runner for check/update/rebuild and prints results.

mod analyzer;
mod baseline;
mod cli;
mod collector;
mod compiler;
mod config;
mod discovery;
mod models;
mod output;
mod runner;
mod utils;
mod vcs;

use clap::Parser;
use cli::{Cli, Commands};
use compiler::CommandCompiler;
use runner::{RunError, RunReport};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Check {
            repo_root,
            baseline,
            output,
            compiler,
            paths,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                baseline.as_deref(),
                output.as_deref(),
                compiler.as_deref(),
                None,
            );
            let compiler = build_compiler(&eff);
            let (run, warnings) = unwrap_run(runner::run_check(&eff, &compiler, &paths));
            output::print_run(&run, &eff.output, &warnings);
            if run.outcome.is_regressed() {
                std::process::exit(1);
            }
        }
        Commands::Update {
            repo_root,
            baseline,
            output,
            compiler,
            no_stage,
            paths,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                baseline.as_deref(),
                output.as_deref(),
                compiler.as_deref(),
                if no_stage { Some(false) } else { None },
            );
            let compiler = build_compiler(&eff);
            let (run, warnings) = unwrap_run(runner::run_update(&eff, &compiler, &paths));
            output::print_run(&run, &eff.output, &warnings);
            if run.outcome.is_regressed() {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "Baseline left unchanged; fix the regressions or run 'redline rebuild'."
                );
                std::process::exit(1);
            }
            if run.baseline_written && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    format!("Baseline updated: {}", eff.baseline)
                );
            }
        }
        Commands::Rebuild {
            repo_root,
            baseline,
            output,
            compiler,
            no_stage,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                baseline.as_deref(),
                output.as_deref(),
                compiler.as_deref(),
                if no_stage { Some(false) } else { None },
            );
            let compiler = build_compiler(&eff);
            let (run, warnings) = unwrap_run(runner::run_rebuild(&eff, &compiler));
            output::print_run(&run, &eff.output, &warnings);
            if eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    format!("Baseline rebuilt: {}", eff.baseline)
                );
            }
        }
    }
}

/// Validate the compiler collaborator configuration and construct it.
/// Exits with a usage error when no command is configured.
fn build_compiler(eff: &config::Effective) -> CommandCompiler {
    if config::load_config(&eff.repo_root).is_none() {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No redline.toml found; using defaults."
        );
    }
    let command = match eff.compiler_command.clone() {
        Some(command) => command,
        None => {
            eprintln!(
                "{} {}",
                utils::error_prefix(),
                "Compiler command is not configured. Pass --compiler or add [compiler].command to redline.toml."
            );
            std::process::exit(2);
        }
    };
    CommandCompiler::new(
        &eff.repo_root,
        command,
        eff.compiler_args.clone(),
        &eff.version_file,
    )
}

/// Report a fatal run error (exit 2); regressions are not errors and
/// are handled by the callers above.
fn unwrap_run(result: Result<(RunReport, Vec<String>), RunError>) -> (RunReport, Vec<String>) {
    match result {
        Ok(run) => run,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    }
}
