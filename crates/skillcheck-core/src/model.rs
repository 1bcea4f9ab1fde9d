//! Check-set data model.
//!
//! A check set is a batch of (user answer, canonical answer, expected verdict)
//! fixtures. Grading one confirms the equivalence rules behave as intended.

use serde::{Deserialize, Serialize};

use crate::checker::AnswerPolicy;
use crate::rational::Rational;

/// A single grading fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckCase {
    /// Unique identifier within the set.
    pub id: String,
    /// What this case pins down.
    #[serde(default)]
    pub description: String,
    /// The learner's answer as typed.
    pub user_answer: String,
    /// The canonical answer.
    pub correct_answer: String,
    /// The verdict the checker should reach.
    #[serde(default = "default_true")]
    pub expect_correct: bool,
    /// Skill whose policy applies to this case.
    #[serde(default)]
    pub skill: Option<String>,
    /// Order override; wins over the skill's policy.
    #[serde(default)]
    pub ordered: Option<bool>,
    /// Tolerance override; wins over the skill's policy.
    #[serde(default)]
    pub tolerance: Option<Rational>,
    /// Tags for filtering cases.
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl CheckCase {
    pub fn new(
        id: impl Into<String>,
        user_answer: impl Into<String>,
        correct_answer: impl Into<String>,
        expect_correct: bool,
    ) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            user_answer: user_answer.into(),
            correct_answer: correct_answer.into(),
            expect_correct,
            skill: None,
            ordered: None,
            tolerance: None,
            tags: Vec::new(),
        }
    }

    /// Layer this case's overrides on top of a base policy.
    pub fn policy_over(&self, base: AnswerPolicy) -> AnswerPolicy {
        AnswerPolicy {
            ordered: self.ordered.or(base.ordered),
            tolerance: self.tolerance.or(base.tolerance),
        }
    }

    /// True when the case carries any of `tags`, or `tags` is empty.
    pub fn matches_tags(&self, tags: &[String]) -> bool {
        tags.is_empty() || self.tags.iter().any(|t| tags.contains(t))
    }
}

/// A collection of check cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSet {
    /// Unique identifier for this check set.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this check set.
    #[serde(default)]
    pub description: String,
    /// The cases in this set.
    #[serde(default)]
    pub cases: Vec<CheckCase>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_overrides_win_over_skill_policy() {
        let mut case = CheckCase::new("c", "1", "1", true);
        let base = AnswerPolicy::unordered().with_tolerance(Rational::new(1, 10).unwrap());
        assert_eq!(case.policy_over(base), base);

        case.ordered = Some(true);
        let policy = case.policy_over(base);
        assert_eq!(policy.ordered, Some(true));
        assert_eq!(policy.tolerance, base.tolerance);
    }

    #[test]
    fn tag_filter() {
        let mut case = CheckCase::new("c", "1", "1", true);
        assert!(case.matches_tags(&[]));
        assert!(!case.matches_tags(&["sets".into()]));
        case.tags = vec!["sets".into(), "synonyms".into()];
        assert!(case.matches_tags(&["sets".into()]));
    }

    #[test]
    fn check_case_serde_roundtrip() {
        let mut case = CheckCase::new("decimal", "2.5", "5/2", true);
        case.tolerance = Some(Rational::new(1, 100).unwrap());
        let json = serde_json::to_string(&case).unwrap();
        assert!(json.contains("\"1/100\""));
        let deserialized: CheckCase = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, case);
    }
}
