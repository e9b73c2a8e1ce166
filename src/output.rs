//! Output rendering for check, update, and rebuild runs.
//!
//! Supports `human` (default) and `json` outputs. The JSON form carries
//! the status contract (`clean` / `regressed` / `improved-or-clean`),
//! per-file deltas, and a top-level summary.

use crate::runner::RunReport;
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::{json, Value as JsonVal};

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print one run's results in the requested format.
pub fn print_run(run: &RunReport, output: &str, warnings: &[String]) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_run_json(run, warnings)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for warning in warnings {
                eprintln!("{} {}", utils::warn_prefix(), warning);
            }
            for (file, delta) in &run.report.increases {
                let line = format!("regressed {} (+{})", file, delta);
                if color {
                    println!("{} {}", "✖".red(), line.red().bold());
                } else {
                    println!("✖ {}", line);
                }
            }
            for (file, delta) in &run.report.decreases {
                let line = format!("improved {} (-{})", file, delta);
                if color {
                    println!("{} {}", "✔".green(), line.green());
                } else {
                    println!("✔ {}", line);
                }
            }
            let summary = format!(
                "— Summary — status={} regressed={} improved={} files={}",
                run.outcome.status(),
                run.report.increases.len(),
                run.report.decreases.len(),
                run.files_checked
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose the run JSON object (pure) for testing/snapshot purposes.
pub fn compose_run_json(run: &RunReport, warnings: &[String]) -> JsonVal {
    let deltas = |map: &std::collections::BTreeMap<String, u64>| -> Vec<JsonVal> {
        map.iter()
            .map(|(file, delta)| json!({"file": file, "delta": delta}))
            .collect()
    };
    json!({
        "status": run.outcome.status(),
        "details": deltas(&run.report.increases),
        "improvements": deltas(&run.report.decreases),
        "summary": {
            "files": run.files_checked,
            "regressed": run.report.increases.len(),
            "improved": run.report.decreases.len(),
            "baselineWritten": run.baseline_written,
        },
        "warnings": warnings,
    })
}
