//! Learner-facing result messages.

use serde::{Deserialize, Serialize};

/// Canonical answer meaning "this answer is drawn and cannot be auto-graded".
pub const GRAPH_SENTINEL: &str = "graph";

/// Message shown for drawing-based answers.
pub const GRAPH_INSTRUCTION: &str =
    "這題需要在座標平面上作圖，系統無法自動批改，請對照解答自行檢查。(Drawing answers are checked by hand.)";

/// The outcome of one check call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the answer was judged correct.
    pub correct: bool,
    /// Bilingual message for the learner.
    pub result: String,
    /// Whether the learner may move on. Always true today.
    pub next_question: bool,
}

/// Returns true when the canonical answer is the drawing sentinel.
pub fn is_graph_sentinel(correct_answer: &str) -> bool {
    correct_answer.trim() == GRAPH_SENTINEL
}

/// Renders verdicts with fixed templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackFormatter;

impl FeedbackFormatter {
    pub fn format(&self, is_correct: bool, correct_answer_display: &str) -> Verdict {
        let display = display_math(correct_answer_display);
        let result = if is_correct {
            format!("完全正確！答案是 ${display}$。")
        } else {
            format!("答案不正確。正確答案應為：${display}$")
        };
        Verdict {
            correct: is_correct,
            result,
            next_question: true,
        }
    }

    pub fn graph_instruction(&self) -> Verdict {
        Verdict {
            correct: false,
            result: GRAPH_INSTRUCTION.to_string(),
            next_question: true,
        }
    }
}

/// Drop existing `$` delimiters so the template does not double-wrap.
fn display_math(text: &str) -> String {
    text.trim().replace('$', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_template() {
        let verdict = FeedbackFormatter.format(true, "5/2");
        assert!(verdict.correct);
        assert!(verdict.next_question);
        assert_eq!(verdict.result, "完全正確！答案是 $5/2$。");
    }

    #[test]
    fn incorrect_template_unwraps_existing_math() {
        let verdict = FeedbackFormatter.format(false, "$\\frac{5}{2}$");
        assert!(!verdict.correct);
        assert!(verdict.next_question);
        assert_eq!(verdict.result, "答案不正確。正確答案應為：$\\frac{5}{2}$");
    }

    #[test]
    fn graph_verdict_never_correct() {
        let verdict = FeedbackFormatter.graph_instruction();
        assert!(!verdict.correct);
        assert!(verdict.next_question);
        assert_eq!(verdict.result, GRAPH_INSTRUCTION);
    }

    #[test]
    fn sentinel_detection_trims() {
        assert!(is_graph_sentinel("graph"));
        assert!(is_graph_sentinel(" graph\n"));
        assert!(!is_graph_sentinel("Graph paper"));
    }
}
