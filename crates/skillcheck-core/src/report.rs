//! Grading report types with JSON persistence and regression detection.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value::NormalizedValue;

/// A complete grading report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the check set.
    pub check_set: CheckSetSummary,
    /// One outcome per graded case.
    pub outcomes: Vec<CaseOutcome>,
    /// Aggregate counts.
    pub summary: ReportSummary,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a check set (without the full case definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSetSummary {
    pub id: String,
    pub name: String,
    pub case_count: usize,
}

/// The result of grading one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub case_id: String,
    pub user_answer: String,
    pub correct_answer: String,
    /// Verdict the case expected.
    pub expect_correct: bool,
    /// Verdict the checker reached.
    pub correct: bool,
    /// Feedback text shown to the learner.
    pub result: String,
    /// Normalized learner answer; absent for drawing answers.
    #[serde(default)]
    pub user_value: Option<NormalizedValue>,
    /// Normalized canonical answer; absent for drawing answers.
    #[serde(default)]
    pub correct_value: Option<NormalizedValue>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CaseOutcome {
    /// The checker agreed with the expected verdict.
    pub fn as_expected(&self) -> bool {
        self.correct == self.expect_correct
    }

    /// Variant name of the canonical answer, or `graph`.
    pub fn kind(&self) -> &'static str {
        self.correct_value
            .as_ref()
            .map(|value| value.kind().as_str())
            .unwrap_or("graph")
    }
}

/// Aggregate counts over all outcomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub as_expected: usize,
    pub mismatches: usize,
    /// Cases the checker graded correct.
    pub accepted: usize,
    /// Per canonical-answer variant.
    pub by_kind: BTreeMap<String, KindSummary>,
}

/// Counts for one answer variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KindSummary {
    pub total: usize,
    pub mismatches: usize,
}

impl ReportSummary {
    pub fn from_outcomes(outcomes: &[CaseOutcome]) -> Self {
        let mut summary = ReportSummary {
            total: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            let kind = summary.by_kind.entry(outcome.kind().to_string()).or_default();
            kind.total += 1;
            if outcome.as_expected() {
                summary.as_expected += 1;
            } else {
                summary.mismatches += 1;
                kind.mismatches += 1;
            }
            if outcome.correct {
                summary.accepted += 1;
            }
        }
        summary
    }

    /// Share of cases graded as expected, in `[0, 1]`.
    pub fn agreement_rate(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.as_expected as f64 / self.total as f64
    }
}

impl CheckReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: CheckReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.as_expected())
    }

    /// Returns true if any case disagreed with its expected verdict.
    pub fn has_mismatches(&self) -> bool {
        self.summary.mismatches > 0
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {} (`{}`)\n\n", self.check_set.name, self.check_set.id));
        md.push_str(&format!(
            "**Summary:** {}/{} as expected ({:.1}%), {} mismatches\n\n",
            self.summary.as_expected,
            self.summary.total,
            self.summary.agreement_rate() * 100.0,
            self.summary.mismatches
        ));

        md.push_str("| Kind | Cases | Mismatches |\n");
        md.push_str("|------|-------|------------|\n");
        for (kind, counts) in &self.summary.by_kind {
            md.push_str(&format!("| {kind} | {} | {} |\n", counts.total, counts.mismatches));
        }
        md.push('\n');

        if self.has_mismatches() {
            md.push_str("### Mismatches\n\n");
            md.push_str("| Case | User | Canonical | Expected | Got |\n");
            md.push_str("|------|------|-----------|----------|-----|\n");
            for o in self.mismatches() {
                md.push_str(&format!(
                    "| {} | `{}` | `{}` | {} | {} |\n",
                    o.case_id,
                    o.user_answer,
                    o.correct_answer,
                    verdict_word(o.expect_correct),
                    verdict_word(o.correct)
                ));
            }
        }

        md
    }

    /// Compare this report against a baseline to detect regressions.
    pub fn compare(&self, baseline: &CheckReport) -> RegressionReport {
        let by_id = |report: &CheckReport| -> HashMap<String, bool> {
            report
                .outcomes
                .iter()
                .map(|o| (o.case_id.clone(), o.as_expected()))
                .collect()
        };

        let baseline_map = by_id(baseline);
        let current_map = by_id(self);

        let mut regressions = Vec::new();
        let mut fixes = Vec::new();
        let mut unchanged = 0usize;
        let mut new_cases = 0usize;

        for outcome in &self.outcomes {
            let current = outcome.as_expected();
            match baseline_map.get(&outcome.case_id) {
                Some(&true) if !current => regressions.push(outcome.case_id.clone()),
                Some(&false) if current => fixes.push(outcome.case_id.clone()),
                Some(_) => unchanged += 1,
                None => new_cases += 1,
            }
        }

        let removed_cases = baseline_map
            .keys()
            .filter(|id| !current_map.contains_key(*id))
            .count();

        RegressionReport {
            regressions,
            fixes,
            unchanged,
            new_cases,
            removed_cases,
        }
    }
}

fn verdict_word(correct: bool) -> &'static str {
    if correct {
        "correct"
    } else {
        "incorrect"
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Cases graded as expected in the baseline but not now.
    pub regressions: Vec<String>,
    /// Cases that were mismatches in the baseline and now agree.
    pub fixes: Vec<String>,
    /// Cases with the same agreement in both reports.
    pub unchanged: usize,
    /// Cases in current but not baseline.
    pub new_cases: usize,
    /// Cases in baseline but not current.
    pub removed_cases: usize,
}

impl RegressionReport {
    /// Format the regression report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} fixes, {} unchanged, {} new, {} removed\n\n",
            self.regressions.len(),
            self.fixes.len(),
            self.unchanged,
            self.new_cases,
            self.removed_cases
        ));

        if !self.regressions.is_empty() {
            md.push_str("### Regressions\n\n");
            for id in &self.regressions {
                md.push_str(&format!("- {id}\n"));
            }
            md.push('\n');
        }

        if !self.fixes.is_empty() {
            md.push_str("### Fixes\n\n");
            for id in &self.fixes {
                md.push_str(&format!("- {id}\n"));
            }
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(case_id: &str, expect_correct: bool, correct: bool) -> CaseOutcome {
        CaseOutcome {
            case_id: case_id.into(),
            user_answer: "2.5".into(),
            correct_answer: "5/2".into(),
            expect_correct,
            correct,
            result: String::new(),
            user_value: None,
            correct_value: Some(NormalizedValue::integer(5)),
            tags: vec![],
        }
    }

    fn make_report(outcomes: Vec<CaseOutcome>) -> CheckReport {
        CheckReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            check_set: CheckSetSummary {
                id: "test".into(),
                name: "Test".into(),
                case_count: outcomes.len(),
            },
            summary: ReportSummary::from_outcomes(&outcomes),
            outcomes,
            duration_ms: 0,
        }
    }

    #[test]
    fn summary_counts() {
        let mut graph = outcome("drawn", false, false);
        graph.correct_value = None;
        let report = make_report(vec![
            outcome("a", true, true),
            outcome("b", true, false),
            outcome("c", false, false),
            graph,
        ]);
        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.as_expected, 3);
        assert_eq!(report.summary.mismatches, 1);
        assert_eq!(report.summary.accepted, 1);
        assert_eq!(report.summary.by_kind["number"].total, 3);
        assert_eq!(report.summary.by_kind["number"].mismatches, 1);
        assert_eq!(report.summary.by_kind["graph"].total, 1);
        assert!(report.has_mismatches());
        assert_eq!(report.mismatches().count(), 1);
    }

    #[test]
    fn empty_report_agrees() {
        let report = make_report(vec![]);
        assert!(!report.has_mismatches());
        assert!((report.summary.agreement_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compare_identical_reports() {
        let baseline = make_report(vec![outcome("case1", true, true)]);
        let current = make_report(vec![outcome("case1", true, true)]);

        let report = current.compare(&baseline);
        assert!(report.regressions.is_empty());
        assert!(report.fixes.is_empty());
        assert_eq!(report.unchanged, 1);
    }

    #[test]
    fn compare_with_regression_and_fix() {
        let baseline = make_report(vec![outcome("a", true, true), outcome("b", true, false)]);
        let current = make_report(vec![outcome("a", true, false), outcome("b", true, true)]);

        let report = current.compare(&baseline);
        assert_eq!(report.regressions, vec!["a"]);
        assert_eq!(report.fixes, vec!["b"]);
        assert!(report.has_regressions());
    }

    #[test]
    fn compare_with_new_and_removed() {
        let baseline = make_report(vec![outcome("old_case", true, true)]);
        let current = make_report(vec![outcome("new_case", true, true)]);

        let report = current.compare(&baseline);
        assert_eq!(report.new_cases, 1);
        assert_eq!(report.removed_cases, 1);
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report(vec![outcome("case1", true, true)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = CheckReport::load_json(&path).unwrap();

        assert_eq!(loaded.check_set.id, "test");
        assert_eq!(loaded.outcomes, report.outcomes);
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn markdown_output() {
        let report = make_report(vec![outcome("case1", true, true), outcome("case2", true, false)]);
        let md = report.to_markdown();
        assert!(md.contains("1/2 as expected"));
        assert!(md.contains("### Mismatches"));
        assert!(md.contains("case2"));
        assert!(!md.contains("| case1 |"));

        let regression = report.compare(&make_report(vec![outcome("case2", true, true)]));
        assert!(regression.to_markdown().contains("### Regressions"));
    }
}
