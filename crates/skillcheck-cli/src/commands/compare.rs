//! The `skillcheck compare` command.

use std::path::PathBuf;

use anyhow::Result;

use skillcheck_core::report::CheckReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = CheckReport::load_json(&baseline_path)?;
    let current = CheckReport::load_json(&current_path)?;

    let report = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Comparison: {} regressions, {} fixes, {} unchanged",
                report.regressions.len(),
                report.fixes.len(),
                report.unchanged
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for id in &report.regressions {
                    println!("  {id}");
                }
            }

            if !report.fixes.is_empty() {
                println!("\nFixes:");
                for id in &report.fixes {
                    println!("  {id}");
                }
            }

            if report.new_cases > 0 {
                println!("\n{} new case(s)", report.new_cases);
            }
            if report.removed_cases > 0 {
                println!("{} removed case(s)", report.removed_cases);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        anyhow::bail!("{} regression(s) found", report.regressions.len());
    }

    Ok(())
}
