//! The `skillcheck grade` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use skillcheck_core::checker::AnswerChecker;
use skillcheck_core::config::load_config_from;
use skillcheck_core::engine::{GradingEngine, ProgressReporter};
use skillcheck_core::parser::load_check_sets;
use skillcheck_core::report::{CaseOutcome, CheckReport};
use skillcheck_core::SkillRegistry;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_case_start(&self, _case_id: &str) {}

    fn on_case_complete(&self, outcome: &CaseOutcome) {
        if !outcome.as_expected() {
            eprintln!(
                "  MISMATCH: {} :: `{}` vs `{}` expected {} got {}",
                outcome.case_id,
                outcome.user_answer,
                outcome.correct_answer,
                outcome.expect_correct,
                outcome.correct,
            );
        }
    }

    fn on_set_complete(&self, total: usize, mismatches: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {}/{total} as expected, {mismatches} mismatched ({:.1}ms)",
            total - mismatches,
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

pub fn execute(
    check_set_path: PathBuf,
    output: Option<PathBuf>,
    filter: Option<String>,
    config_path: Option<PathBuf>,
    fail_on_mismatch: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let check_sets = load_check_sets(&check_set_path)?;
    anyhow::ensure!(
        !check_sets.is_empty(),
        "no check sets found in {}",
        check_set_path.display()
    );
    tracing::debug!(
        path = %check_set_path.display(),
        sets = check_sets.len(),
        "loaded check sets"
    );

    let tags: Vec<String> = filter
        .as_deref()
        .map(|f| {
            f.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let engine = GradingEngine::new(
        AnswerChecker::from_config(&config),
        SkillRegistry::with_builtin_skills(),
    )
    .with_tag_filter(tags);
    let reporter = ConsoleReporter;

    let mut any_mismatch = false;

    for check_set in &check_sets {
        eprintln!(
            "skillcheck v{} — Grading {} ({} cases)",
            env!("CARGO_PKG_VERSION"),
            check_set.name,
            check_set.cases.len()
        );

        let report = engine.run(check_set, &reporter);
        print_summary(&report);
        any_mismatch |= report.has_mismatches();

        std::fs::create_dir_all(&output)?;
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = output.join(format!("report-{}-{timestamp}.json", check_set.id));
        report.save_json(&path)?;
        eprintln!("Results saved to: {}", path.display());
    }

    if fail_on_mismatch && any_mismatch {
        anyhow::bail!("some cases disagreed with their expected verdict");
    }

    Ok(())
}

fn print_summary(report: &CheckReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Kind", "Cases", "As expected", "Mismatches"]);

    for (kind, counts) in &report.summary.by_kind {
        table.add_row(vec![
            Cell::new(kind),
            Cell::new(counts.total),
            Cell::new(counts.total - counts.mismatches),
            Cell::new(counts.mismatches),
        ]);
    }
    table.add_row(vec![
        Cell::new("total"),
        Cell::new(report.summary.total),
        Cell::new(report.summary.as_expected),
        Cell::new(report.summary.mismatches),
    ]);

    eprintln!("\n{table}");
    eprintln!(
        "Agreement: {:.1}%",
        report.summary.agreement_rate() * 100.0
    );
}
