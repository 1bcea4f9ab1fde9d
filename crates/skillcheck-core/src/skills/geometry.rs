//! Coordinate geometry skills.

use rand::{Rng, RngCore};

use super::{latex_fraction, linear_terms, nonzero, ratio, span};
use crate::checker::AnswerPolicy;
use crate::feedback::GRAPH_SENTINEL;
use crate::traits::{Question, SkillModule};

/// Midpoint of a segment, answered as an ordered pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct Midpoint;

impl SkillModule for Midpoint {
    fn id(&self) -> &str {
        "midpoint"
    }

    fn title(&self) -> &str {
        "中點座標 (Midpoint)"
    }

    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> Question {
        let bound = span(level, 6);
        let (x1, y1) = (rng.random_range(-bound..=bound), rng.random_range(-bound..=bound));
        let (x2, y2) = (rng.random_range(-bound..=bound), rng.random_range(-bound..=bound));
        let mx = ratio(x1 + x2, 2);
        let my = ratio(y1 + y2, 2);

        Question::new(
            format!("已知 $A({x1}, {y1})$、$B({x2}, {y2})$，求線段 $\\overline{{AB}}$ 的中點座標。"),
            format!("({mx}, {my})"),
        )
        .with_answer(format!(
            "$({}, {})$",
            latex_fraction(&mx),
            latex_fraction(&my)
        ))
    }

    fn policy(&self) -> AnswerPolicy {
        AnswerPolicy::ordered()
    }
}

/// Draw `y = mx + b`. Answers are drawings, so checking always defers to the
/// learner.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotLine;

impl SkillModule for PlotLine {
    fn id(&self) -> &str {
        "plot_line"
    }

    fn title(&self) -> &str {
        "畫直線 (Plot a line)"
    }

    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> Question {
        let slope = nonzero(rng, span(level, 2).min(6));
        let intercept = rng.random_range(-span(level, 4)..=span(level, 4));
        let line = linear_terms(&[(slope, "x"), (intercept, "")]);

        Question::new(
            format!("在坐標平面上畫出 $y = {line}$ 的圖形。"),
            GRAPH_SENTINEL,
        )
        .with_answer(format!(
            "通過 $(0, {intercept})$ 與 $(1, {})$ 的直線",
            slope + intercept
        ))
    }
}
