//! Core trait definitions for skill modules.
//!
//! A skill module generates questions of one kind and knows how to check the
//! learner's answers to them. Modules are registered as trait objects in the
//! [`SkillRegistry`](crate::registry::SkillRegistry).

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::checker::{AnswerChecker, AnswerPolicy};
use crate::feedback::Verdict;

// ---------------------------------------------------------------------------
// Skill module trait
// ---------------------------------------------------------------------------

/// A question generator paired with its checking rules.
pub trait SkillModule: Send + Sync {
    /// Stable identifier (e.g. "fraction_addition").
    fn id(&self) -> &str;

    /// Human-readable title.
    fn title(&self) -> &str;

    /// Generate a question. Higher levels widen the number ranges.
    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> Question;

    /// Checking overrides for this skill's answers.
    fn policy(&self) -> AnswerPolicy {
        AnswerPolicy::default()
    }

    /// Check a learner answer against a canonical answer.
    fn check(&self, user_answer: &str, correct_answer: &str) -> Verdict {
        AnswerChecker::default().check_with_policy(user_answer, correct_answer, &self.policy())
    }
}

/// A generated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text; may embed `$…$` LaTeX and `<br>`.
    pub question_text: String,
    /// Display form of the answer. Mirrors `correct_answer` when absent.
    #[serde(default)]
    pub answer: Option<String>,
    /// Canonical answer passed back to `check`.
    pub correct_answer: String,
}

impl Question {
    pub fn new(question_text: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self {
            question_text: question_text.into(),
            answer: None,
            correct_answer: correct_answer.into(),
        }
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }
}
