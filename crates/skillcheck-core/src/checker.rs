//! The answer-checking facade: normalize both sides, match, format feedback.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::CheckerConfig;
use crate::feedback::{is_graph_sentinel, FeedbackFormatter, Verdict};
use crate::matcher::EquivalenceMatcher;
use crate::normalize::AnswerNormalizer;
use crate::rational::Rational;
use crate::value::{NormalizedValue, VariantHint};

/// Per-question overrides a skill may apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPolicy {
    /// `Some(true)` forces positional lists, `Some(false)` forces sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered: Option<bool>,
    /// Replaces the checker's numeric tolerance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<Rational>,
}

impl AnswerPolicy {
    pub fn ordered() -> Self {
        Self {
            ordered: Some(true),
            ..Self::default()
        }
    }

    pub fn unordered() -> Self {
        Self {
            ordered: Some(false),
            ..Self::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: Rational) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    fn hint(&self) -> Option<VariantHint> {
        self.ordered.map(|ordered| {
            if ordered {
                VariantHint::OrderedList
            } else {
                VariantHint::UnorderedSet
            }
        })
    }
}

/// Both normalized sides of a comparison and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub user: NormalizedValue,
    pub correct: NormalizedValue,
    pub matched: bool,
}

/// A verdict plus the evaluation it was formatted from.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub verdict: Verdict,
    pub evaluation: Option<Evaluation>,
}

/// Normalizer, matcher and formatter wired together.
#[derive(Debug, Clone, Default)]
pub struct AnswerChecker {
    normalizer: AnswerNormalizer,
    matcher: EquivalenceMatcher,
    formatter: FeedbackFormatter,
}

impl AnswerChecker {
    pub fn new(normalizer: AnswerNormalizer, matcher: EquivalenceMatcher) -> Self {
        Self {
            normalizer,
            matcher,
            formatter: FeedbackFormatter,
        }
    }

    /// Build a checker whose normalizer and matcher share the configured
    /// synonym table.
    pub fn from_config(config: &CheckerConfig) -> Self {
        let synonyms = config.synonym_table();
        Self::new(
            AnswerNormalizer::new(Arc::clone(&synonyms)).with_ordered_lists(config.ordered_lists),
            EquivalenceMatcher::new(synonyms).with_tolerance(config.tolerance),
        )
    }

    pub fn normalizer(&self) -> &AnswerNormalizer {
        &self.normalizer
    }

    pub fn matcher(&self) -> &EquivalenceMatcher {
        &self.matcher
    }

    pub fn check(&self, user_answer: &str, correct_answer: &str) -> Verdict {
        self.check_with_policy(user_answer, correct_answer, &AnswerPolicy::default())
    }

    pub fn check_with_policy(
        &self,
        user_answer: &str,
        correct_answer: &str,
        policy: &AnswerPolicy,
    ) -> Verdict {
        self.assess(user_answer, correct_answer, policy).verdict
    }

    /// The verdict together with the normalized values behind it. Drawing
    /// answers carry no evaluation.
    pub fn assess(
        &self,
        user_answer: &str,
        correct_answer: &str,
        policy: &AnswerPolicy,
    ) -> Assessment {
        if is_graph_sentinel(correct_answer) {
            tracing::debug!("graph answer, skipping comparison");
            return Assessment {
                verdict: self.formatter.graph_instruction(),
                evaluation: None,
            };
        }
        let evaluation = self.evaluate(user_answer, correct_answer, policy);
        Assessment {
            verdict: self.formatter.format(evaluation.matched, correct_answer),
            evaluation: Some(evaluation),
        }
    }

    /// Normalize and compare without formatting feedback.
    pub fn evaluate(
        &self,
        user_answer: &str,
        correct_answer: &str,
        policy: &AnswerPolicy,
    ) -> Evaluation {
        let correct = self.normalizer.normalize(correct_answer, policy.hint());
        if matches!(correct, NormalizedValue::Symbolic(_)) {
            tracing::debug!(
                correct_answer,
                "canonical answer did not normalize to a structured value"
            );
        }
        let user = self.normalizer.normalize(user_answer, Some(correct.kind()));
        let tolerance = policy.tolerance.unwrap_or_else(|| self.matcher.tolerance());
        let matched = self.matcher.equivalent_within(&user, &correct, tolerance);

        tracing::debug!(
            user = %user,
            correct = %correct,
            kind = %correct.kind(),
            matched,
            "checked answer"
        );

        Evaluation {
            user,
            correct,
            matched,
        }
    }
}

/// Check with the default configuration.
pub fn check(user_answer: &str, correct_answer: &str) -> Verdict {
    AnswerChecker::default().check(user_answer, correct_answer)
}
