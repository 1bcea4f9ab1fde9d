//! Algebra skills: 2×2 linear systems and factorable quadratics.

use rand::{Rng, RngCore};

use super::{linear_terms, nonzero, span};
use crate::checker::AnswerPolicy;
use crate::traits::{Question, SkillModule};

/// Solve a 2×2 system with a unique integer solution; answered `x=…, y=…`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSystem;

impl SkillModule for LinearSystem {
    fn id(&self) -> &str {
        "linear_system"
    }

    fn title(&self) -> &str {
        "二元一次聯立方程式 (Linear system)"
    }

    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> Question {
        let bound = span(level, 5);
        let x = rng.random_range(-bound..=bound);
        let y = rng.random_range(-bound..=bound);

        let coefficient_bound = span(level, 3).min(9);
        let (a1, b1, a2, b2) = loop {
            let a1 = nonzero(rng, coefficient_bound);
            let b1 = nonzero(rng, coefficient_bound);
            let a2 = nonzero(rng, coefficient_bound);
            let b2 = nonzero(rng, coefficient_bound);
            if a1 * b2 - a2 * b1 != 0 {
                break (a1, b1, a2, b2);
            }
        };
        let c1 = a1 * x + b1 * y;
        let c2 = a2 * x + b2 * y;

        Question::new(
            format!(
                "解聯立方程式：<br>$\\begin{{cases}} {} = {c1} \\\\ {} = {c2} \\end{{cases}}$",
                linear_terms(&[(a1, "x"), (b1, "y")]),
                linear_terms(&[(a2, "x"), (b2, "y")]),
            ),
            format!("x={x}, y={y}"),
        )
        .with_answer(format!("$x = {x}, y = {y}$"))
    }
}

/// Roots of a monic-times-k quadratic with distinct integer roots.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticRoots;

impl SkillModule for QuadraticRoots {
    fn id(&self) -> &str {
        "quadratic_roots"
    }

    fn title(&self) -> &str {
        "一元二次方程式求根 (Quadratic roots)"
    }

    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> Question {
        let bound = span(level, 6);
        let r1 = rng.random_range(-bound..=bound);
        let r2 = loop {
            let candidate = rng.random_range(-bound..=bound);
            if candidate != r1 {
                break candidate;
            }
        };
        let k = if level > 1 { rng.random_range(1..=3) } else { 1 };

        let (small, large) = (r1.min(r2), r1.max(r2));
        let equation = linear_terms(&[(k, "x^2"), (-k * (r1 + r2), "x"), (k * r1 * r2, "")]);

        Question::new(
            format!("解方程式：${equation} = 0$<br>若有兩個解，請以逗號分隔。"),
            format!("{small}, {large}"),
        )
        .with_answer(format!("$x = {small}$ 或 $x = {large}$"))
    }

    fn policy(&self) -> AnswerPolicy {
        AnswerPolicy::unordered()
    }
}
