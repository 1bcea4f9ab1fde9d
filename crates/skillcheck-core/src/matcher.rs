//! Equivalence between normalized answers.

use std::sync::Arc;

use crate::arith;
use crate::rational::Rational;
use crate::synonyms::SynonymTable;
use crate::value::NormalizedValue;

/// Default numeric tolerance: one millionth.
pub const DEFAULT_TOLERANCE: Rational = Rational::ONE_MILLIONTH;

/// Decides whether a user value is equivalent to a canonical value.
#[derive(Debug, Clone)]
pub struct EquivalenceMatcher {
    synonyms: Arc<SynonymTable>,
    tolerance: Rational,
}

impl Default for EquivalenceMatcher {
    fn default() -> Self {
        Self::new(Arc::new(SynonymTable::default()))
    }
}

impl EquivalenceMatcher {
    pub fn new(synonyms: Arc<SynonymTable>) -> Self {
        Self {
            synonyms,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: Rational) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> Rational {
        self.tolerance
    }

    /// Compare with the matcher's own tolerance.
    pub fn equivalent(&self, user: &NormalizedValue, correct: &NormalizedValue) -> bool {
        self.equivalent_within(user, correct, self.tolerance)
    }

    /// Compare with an explicit numeric tolerance.
    pub fn equivalent_within(
        &self,
        user: &NormalizedValue,
        correct: &NormalizedValue,
        tolerance: Rational,
    ) -> bool {
        use NormalizedValue::*;

        match (user, correct) {
            // Two exact fractions compare exactly; a decimal on either side
            // brings in the tolerance.
            (
                Number {
                    value: a,
                    exact: true,
                },
                Number {
                    value: b,
                    exact: true,
                },
            ) => a == b,
            (Number { value: a, .. }, Number { value: b, .. }) => numbers_close(a, b, &tolerance),
            (OrderedList(a), OrderedList(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|(x, y)| self.equivalent_within(x, y, tolerance))
            }
            (UnorderedSet(a), UnorderedSet(b)) => {
                self.covers(a, b, tolerance) && self.covers(b, a, tolerance)
            }
            (LabeledTuple(a), LabeledTuple(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(name, x)| {
                        b.get(name)
                            .is_some_and(|y| self.equivalent_within(x, y, tolerance))
                    })
            }
            (Token(a), Token(b)) => self.synonyms.canonicalize(a) == self.synonyms.canonicalize(b),
            (Symbolic(a), Symbolic(b)) => a.to_lowercase() == b.to_lowercase(),

            // `x=3` against a bare `3`.
            (LabeledTuple(fields), other) | (other, LabeledTuple(fields)) if fields.len() == 1 => {
                fields
                    .values()
                    .next()
                    .is_some_and(|value| self.equivalent_within(value, other, tolerance))
            }
            (UnorderedSet(items), other) | (other, UnorderedSet(items)) if items.len() == 1 => items
                .first()
                .is_some_and(|only| self.equivalent_within(only, other, tolerance)),
            (Token(token), other) | (other, Token(token)) => {
                let text = other.to_string();
                self.synonyms
                    .resolve(&text)
                    .is_some_and(|resolved| resolved == self.synonyms.canonicalize(token))
            }
            (Symbolic(text), Number { value, .. }) | (Number { value, .. }, Symbolic(text)) => {
                arith::evaluate(text).is_some_and(|coerced| numbers_close(&coerced, value, &tolerance))
            }
            _ => false,
        }
    }

    /// Every item of `a` has an equivalent in `b`.
    fn covers(&self, a: &[NormalizedValue], b: &[NormalizedValue], tolerance: Rational) -> bool {
        a.iter()
            .all(|x| b.iter().any(|y| self.equivalent_within(x, y, tolerance)))
    }
}

/// `|a - b| < tolerance`, with identical values always equal.
pub fn numbers_close(a: &Rational, b: &Rational, tolerance: &Rational) -> bool {
    if a == b {
        return true;
    }
    match a.checked_sub(b).and_then(|diff| diff.checked_abs()) {
        Some(diff) => diff < *tolerance,
        None => (a.to_f64() - b.to_f64()).abs() < tolerance.to_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn r(n: i128, d: i128) -> Rational {
        Rational::new(n, d).unwrap()
    }

    fn eq(user: &str, correct: &str) -> bool {
        let correct_value = normalize(correct, None);
        let user_value = normalize(user, Some(correct_value.kind()));
        EquivalenceMatcher::default().equivalent(&user_value, &correct_value)
    }

    #[test]
    fn tolerance_boundary() {
        let eps = r(1, 1000);
        let base = r(1, 2);
        let inside = base.checked_add(&r(999, 1_000_000)).unwrap();
        let at_edge = base.checked_add(&eps).unwrap();
        assert!(numbers_close(&inside, &base, &eps));
        assert!(!numbers_close(&at_edge, &base, &eps));
        assert!(numbers_close(&base, &base, &Rational::ZERO));
    }

    #[test]
    fn fraction_and_decimal_agree() {
        assert!(eq("0.5", "1/2"));
        assert!(eq("2.5", "5/2"));
        assert!(eq("2 1/2", "2.5"));
        assert!(!eq("0.33", "1/3"));
    }

    #[test]
    fn exact_fractions_ignore_tolerance() {
        assert!(!eq("10000001/10000000", "1"));
        assert!(!eq("1", "10000001/10000000"));
        assert!(eq("0.9999999", "1"));
        assert!(eq("1", "0.9999999"));
        assert!(eq("2/4", "1/2"));

        let coarse = EquivalenceMatcher::default().with_tolerance(r(1, 10));
        assert!(!coarse.equivalent(&normalize("1/3", None), &normalize("3/10", None)));
        assert!(coarse.equivalent(&normalize("0.3", None), &normalize("1/3", None)));
    }

    #[test]
    fn sets_ignore_order_but_not_cardinality() {
        assert!(eq("8,-4", "-4, 8"));
        assert!(eq("-4 或 8", "8,-4"));
        assert!(eq("8, 8, -4", "8,-4"));
        assert!(eq("(-4, 8)", "8, -4"));
        assert!(!eq("-4,8", "8,-4,0"));
        assert!(!eq("8", "8,-4"));
    }

    #[test]
    fn duplicate_only_sets_match_their_single_value() {
        assert!(eq("8, 8", "8"));
        assert!(eq("8", "8, 8"));
        assert!(eq("x = 8, x = 8", "8"));

        let singleton = NormalizedValue::UnorderedSet(vec![NormalizedValue::integer(8)]);
        let matcher = EquivalenceMatcher::default();
        assert!(matcher.equivalent(&singleton, &NormalizedValue::integer(8)));
        assert!(matcher.equivalent(&NormalizedValue::integer(8), &singleton));
        assert!(!matcher.equivalent(&singleton, &NormalizedValue::integer(9)));
    }

    #[test]
    fn ordered_lists_are_positional() {
        assert!(eq("(3, -2)", "(3, -2)"));
        assert!(eq("3, -2", "(3, -2)"));
        assert!(!eq("(-2, 3)", "(3, -2)"));
        assert!(!eq("(3, -2, 1)", "(3, -2)"));
    }

    #[test]
    fn labeled_tuples_bind_values_to_names() {
        assert!(eq("y=2, x=1", "x=1,y=2"));
        assert!(!eq("x=2, y=3", "x=3, y=2"));
        assert!(!eq("x=1", "x=1, y=2"));
        assert!(eq("3", "x=3"));
        assert!(eq("x = 3", "3"));
    }

    #[test]
    fn tokens_use_synonyms_and_ignore_case() {
        assert!(eq("A", "a"));
        assert!(eq("會", "是"));
        assert!(eq("yes", "是"));
        assert!(eq("一樣大", "相等"));
        assert!(!eq("不會", "是"));
        assert!(!eq("B", "A"));
    }

    #[test]
    fn symbolic_compares_text_only() {
        assert!(eq("2X + 1", "2x+1"));
        assert!(eq("$\\sqrt{2}$", "√2"));
        assert!(!eq("1+2x", "2x+1"));
    }

    #[test]
    fn symbolic_coerces_against_numbers() {
        assert!(eq("2+1/2", "5/2"));
        assert!(eq("\\sqrt{16}", "4"));
        assert!(!eq("√2", "1.414"));
        assert!(!eq("abc", "4"));
    }

    #[test]
    fn explicit_tolerance() {
        let matcher = EquivalenceMatcher::default().with_tolerance(r(1, 100));
        let user = normalize("3.14", None);
        let correct = normalize("3.141", None);
        assert!(matcher.equivalent(&user, &correct));
        assert!(!EquivalenceMatcher::default().equivalent(&user, &correct));
    }

    #[test]
    fn cross_variant_mismatches_are_false() {
        assert!(!eq("{1, 2}", "(1, 2)"));
        assert!(!eq("是", "5"));
        assert!(!eq("x=1, y=2", "1, 2"));
    }
}
