//! Grading engine.
//!
//! Runs every case of a check set through the configured checker and
//! collects the outcomes into a report.

use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::checker::{AnswerChecker, AnswerPolicy};
use crate::model::{CheckCase, CheckSet};
use crate::registry::SkillRegistry;
use crate::report::{CaseOutcome, CheckReport, CheckSetSummary, ReportSummary};

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_case_start(&self, case_id: &str);
    fn on_case_complete(&self, outcome: &CaseOutcome);
    fn on_set_complete(&self, total: usize, mismatches: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_case_start(&self, _: &str) {}
    fn on_case_complete(&self, _: &CaseOutcome) {}
    fn on_set_complete(&self, _: usize, _: usize, _: Duration) {}
}

/// Grades check sets.
#[derive(Debug, Clone)]
pub struct GradingEngine {
    checker: AnswerChecker,
    registry: SkillRegistry,
    tag_filter: Vec<String>,
}

impl Default for GradingEngine {
    fn default() -> Self {
        Self::new(AnswerChecker::default(), SkillRegistry::with_builtin_skills())
    }
}

impl GradingEngine {
    pub fn new(checker: AnswerChecker, registry: SkillRegistry) -> Self {
        Self {
            checker,
            registry,
            tag_filter: Vec::new(),
        }
    }

    /// Only grade cases carrying at least one of `tags`.
    pub fn with_tag_filter(mut self, tags: Vec<String>) -> Self {
        self.tag_filter = tags;
        self
    }

    /// Grade every selected case of `check_set`.
    pub fn run(&self, check_set: &CheckSet, progress: &dyn ProgressReporter) -> CheckReport {
        let start = Instant::now();
        let run_id = Uuid::new_v4();

        let outcomes: Vec<CaseOutcome> = check_set
            .cases
            .iter()
            .filter(|case| case.matches_tags(&self.tag_filter))
            .map(|case| {
                progress.on_case_start(&case.id);
                let outcome = self.grade(case);
                if !outcome.as_expected() {
                    tracing::info!(
                        case = %case.id,
                        expected = outcome.expect_correct,
                        got = outcome.correct,
                        "verdict mismatch"
                    );
                }
                progress.on_case_complete(&outcome);
                outcome
            })
            .collect();

        let summary = ReportSummary::from_outcomes(&outcomes);
        let elapsed = start.elapsed();
        progress.on_set_complete(summary.total, summary.mismatches, elapsed);

        CheckReport {
            id: run_id,
            created_at: chrono::Utc::now(),
            check_set: CheckSetSummary {
                id: check_set.id.clone(),
                name: check_set.name.clone(),
                case_count: check_set.cases.len(),
            },
            outcomes,
            summary,
            duration_ms: elapsed.as_millis() as u64,
        }
    }

    /// Grade a single case.
    pub fn grade(&self, case: &CheckCase) -> CaseOutcome {
        let policy = case.policy_over(self.skill_policy(case));
        let assessment = self
            .checker
            .assess(&case.user_answer, &case.correct_answer, &policy);
        let (user_value, correct_value) = match assessment.evaluation {
            Some(evaluation) => (Some(evaluation.user), Some(evaluation.correct)),
            None => (None, None),
        };

        CaseOutcome {
            case_id: case.id.clone(),
            user_answer: case.user_answer.clone(),
            correct_answer: case.correct_answer.clone(),
            expect_correct: case.expect_correct,
            correct: assessment.verdict.correct,
            result: assessment.verdict.result,
            user_value,
            correct_value,
            tags: case.tags.clone(),
        }
    }

    fn skill_policy(&self, case: &CheckCase) -> AnswerPolicy {
        let Some(skill_id) = &case.skill else {
            return AnswerPolicy::default();
        };
        match self.registry.get(skill_id) {
            Ok(skill) => skill.policy(),
            Err(e) => {
                tracing::warn!("case '{}': {e}, using the default policy", case.id);
                AnswerPolicy::default()
            }
        }
    }
}
