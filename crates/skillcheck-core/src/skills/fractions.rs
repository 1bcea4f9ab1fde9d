//! Fraction skills: addition (numeric answer) and comparison (token answer).

use std::cmp::Ordering;

use rand::{Rng, RngCore};

use super::{latex_fraction, ratio, span};
use crate::traits::{Question, SkillModule};

/// `a/b + c/d`, answered as a reduced fraction or integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FractionAddition;

impl SkillModule for FractionAddition {
    fn id(&self) -> &str {
        "fraction_addition"
    }

    fn title(&self) -> &str {
        "分數加法 (Fraction addition)"
    }

    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> Question {
        let max_denom = span(level, 4) + 2;
        let b = rng.random_range(2..=max_denom);
        let d = rng.random_range(2..=max_denom);
        let a = rng.random_range(1..=span(level, b) - 1);
        let c = rng.random_range(1..=span(level, d) - 1);
        let sum = ratio(a * d + c * b, b * d);

        Question::new(
            format!(
                "計算：${} + {}$ = ?（請化為最簡分數）",
                latex_fraction(&ratio(a, b)).replace("\\frac", "\\dfrac"),
                latex_fraction(&ratio(c, d)).replace("\\frac", "\\dfrac"),
            ),
            sum.to_string(),
        )
        .with_answer(format!("${}$", latex_fraction(&sum)))
    }
}

/// Compare `a/b` with `c/d`, answered with `>`, `<` or `=`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareFractions;

impl SkillModule for CompareFractions {
    fn id(&self) -> &str {
        "compare_fractions"
    }

    fn title(&self) -> &str {
        "分數比較 (Compare fractions)"
    }

    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> Question {
        let max_denom = span(level, 6) + 3;
        let b = rng.random_range(2..=max_denom);
        let a = rng.random_range(1..b);
        let (c, d) = if rng.random_bool(0.25) {
            // Equivalent fraction with a different look.
            let k = rng.random_range(2..=4);
            (a * k, b * k)
        } else {
            let d = rng.random_range(2..=max_denom);
            (rng.random_range(1..d), d)
        };

        let symbol = match (a * d).cmp(&(c * b)) {
            Ordering::Greater => ">",
            Ordering::Less => "<",
            Ordering::Equal => "=",
        };

        Question::new(
            format!(
                "比較大小：$\\frac{{{a}}}{{{b}}}$ ◯ $\\frac{{{c}}}{{{d}}}$<br>請在 ◯ 中填入 >、< 或 =。"
            ),
            symbol,
        )
        .with_answer(format!(
            "$\\frac{{{a}}}{{{b}}} {symbol} \\frac{{{c}}}{{{d}}}$"
        ))
    }
}
