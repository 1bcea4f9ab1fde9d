//! Built-in skill modules, one per answer shape.

use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::rational::Rational;
use crate::traits::SkillModule;

pub mod algebra;
pub mod fractions;
pub mod geometry;

pub use algebra::{LinearSystem, QuadraticRoots};
pub use fractions::{CompareFractions, FractionAddition};
pub use geometry::{Midpoint, PlotLine};

/// Highest level that still widens ranges.
const MAX_LEVEL: u32 = 10;

/// Every built-in skill.
pub fn builtin() -> Vec<Arc<dyn SkillModule>> {
    vec![
        Arc::new(FractionAddition),
        Arc::new(CompareFractions),
        Arc::new(LinearSystem),
        Arc::new(QuadraticRoots),
        Arc::new(Midpoint),
        Arc::new(PlotLine),
    ]
}

/// Magnitude bound for generated integers at `level`.
pub(crate) fn span(level: u32, base: i64) -> i64 {
    base * i64::from(level.clamp(1, MAX_LEVEL))
}

/// Uniform integer in `-bound..=bound`, excluding zero.
pub(crate) fn nonzero(rng: &mut dyn RngCore, bound: i64) -> i64 {
    let magnitude = rng.random_range(1..=bound.max(1));
    if rng.random_bool(0.5) {
        -magnitude
    } else {
        magnitude
    }
}

/// Reduced fraction. Generators never pass a zero denominator.
pub(crate) fn ratio(numer: i64, denom: i64) -> Rational {
    Rational::new(i128::from(numer), i128::from(denom)).unwrap_or_default()
}

/// `\frac{n}{d}` for fractions, the plain integer otherwise.
pub(crate) fn latex_fraction(value: &Rational) -> String {
    if value.is_integer() {
        return value.to_string();
    }
    let sign = if value.is_negative() { "-" } else { "" };
    format!("{sign}\\frac{{{}}}{{{}}}", value.numer().abs(), value.denom())
}

/// `a·x + b·y` style sum with signs folded into the operators.
pub(crate) fn linear_terms(terms: &[(i64, &str)]) -> String {
    let mut out = String::new();
    for &(coefficient, variable) in terms {
        if coefficient == 0 {
            continue;
        }
        let magnitude = coefficient.abs();
        let body = if magnitude == 1 && !variable.is_empty() {
            variable.to_string()
        } else {
            format!("{magnitude}{variable}")
        };
        match (out.is_empty(), coefficient < 0) {
            (true, true) => out.push_str(&format!("-{body}")),
            (true, false) => out.push_str(&body),
            (false, true) => out.push_str(&format!(" - {body}")),
            (false, false) => out.push_str(&format!(" + {body}")),
        }
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn linear_terms_formatting() {
        assert_eq!(linear_terms(&[(2, "x"), (3, "y")]), "2x + 3y");
        assert_eq!(linear_terms(&[(-1, "x"), (-1, "y")]), "-x - y");
        assert_eq!(linear_terms(&[(1, "x^2"), (0, "x"), (-6, "")]), "x^2 - 6");
        assert_eq!(linear_terms(&[(0, "x")]), "0");
    }

    #[test]
    fn latex_fraction_formatting() {
        assert_eq!(latex_fraction(&ratio(6, 4)), "\\frac{3}{2}");
        assert_eq!(latex_fraction(&ratio(-1, 3)), "-\\frac{1}{3}");
        assert_eq!(latex_fraction(&ratio(8, 4)), "2");
    }

    #[test]
    fn span_grows_with_level() {
        assert_eq!(span(0, 5), 5);
        assert_eq!(span(3, 5), 15);
        assert_eq!(span(u32::MAX, 5), 50);
    }

    #[test]
    fn nonzero_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let value = nonzero(&mut rng, 4);
            assert!(value != 0 && value.abs() <= 4);
        }
    }
}
