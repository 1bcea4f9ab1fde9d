//! Exact rational numbers.
//!
//! Answers are compared in exact arithmetic so that `0.5`, `1/2` and
//! `\frac{2}{4}` are the same value without any floating point noise.
//! All arithmetic is checked; overflow yields `None` instead of panicking.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseRationalError;

/// A reduced fraction with a strictly positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rational {
    numer: i128,
    denom: i128,
}

impl Rational {
    pub const ZERO: Rational = Rational { numer: 0, denom: 1 };
    pub const ONE: Rational = Rational { numer: 1, denom: 1 };
    pub const ONE_MILLIONTH: Rational = Rational {
        numer: 1,
        denom: 1_000_000,
    };

    /// Build `numer / denom`, reduced. Returns `None` for a zero denominator.
    pub fn new(numer: i128, denom: i128) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        let g = gcd(numer, denom);
        let (mut n, mut d) = (numer / g, denom / g);
        if d < 0 {
            n = n.checked_neg()?;
            d = d.checked_neg()?;
        }
        Some(Self { numer: n, denom: d })
    }

    pub fn from_integer(value: i128) -> Self {
        Self {
            numer: value,
            denom: 1,
        }
    }

    pub fn numer(&self) -> i128 {
        self.numer
    }

    pub fn denom(&self) -> i128 {
        self.denom
    }

    pub fn is_integer(&self) -> bool {
        self.denom == 1
    }

    pub fn is_negative(&self) -> bool {
        self.numer < 0
    }

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let numer = self
            .numer
            .checked_mul(other.denom)?
            .checked_add(other.numer.checked_mul(self.denom)?)?;
        Self::new(numer, self.denom.checked_mul(other.denom)?)
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.checked_add(&other.checked_neg()?)
    }

    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        // Cross-reduce first to keep intermediates small.
        let g1 = gcd(self.numer, other.denom);
        let g2 = gcd(other.numer, self.denom);
        let numer = (self.numer / g1).checked_mul(other.numer / g2)?;
        let denom = (self.denom / g2).checked_mul(other.denom / g1)?;
        Self::new(numer, denom)
    }

    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        self.checked_mul(&other.checked_recip()?)
    }

    pub fn checked_neg(&self) -> Option<Self> {
        Some(Self {
            numer: self.numer.checked_neg()?,
            denom: self.denom,
        })
    }

    pub fn checked_abs(&self) -> Option<Self> {
        Some(Self {
            numer: self.numer.checked_abs()?,
            denom: self.denom,
        })
    }

    pub fn checked_recip(&self) -> Option<Self> {
        Self::new(self.denom, self.numer)
    }

    /// Raise to an integer power. Negative exponents invert the base.
    pub fn checked_pow(&self, exp: i32) -> Option<Self> {
        let base = if exp < 0 { self.checked_recip()? } else { *self };
        let e = exp.unsigned_abs();
        Some(Self {
            numer: base.numer.checked_pow(e)?,
            denom: base.denom.checked_pow(e)?,
        })
    }

    /// Exact square root, defined only for non-negative perfect squares.
    pub fn sqrt_exact(&self) -> Option<Self> {
        if self.numer < 0 {
            return None;
        }
        let n = isqrt(self.numer)?;
        let d = isqrt(self.denom)?;
        Self::new(n, d)
    }

    pub fn to_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }

    /// Render as a terminating decimal when the denominator is of the form
    /// `2^a * 5^b`, e.g. `5/4` → `1.25`.
    pub fn to_decimal_string(&self) -> Option<String> {
        let mut d = self.denom;
        let (mut twos, mut fives) = (0u32, 0u32);
        while d % 2 == 0 {
            d /= 2;
            twos += 1;
        }
        while d % 5 == 0 {
            d /= 5;
            fives += 1;
        }
        if d != 1 {
            return None;
        }
        let places = twos.max(fives);
        if places == 0 {
            return Some(self.numer.to_string());
        }
        let scale = 10i128.checked_pow(places)?;
        let scaled = self.numer.checked_mul(scale / self.denom)?;
        let digits = scaled.unsigned_abs().to_string();
        let places = places as usize;
        let padded = format!("{digits:0>width$}", width = places + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - places);
        let sign = if scaled < 0 { "-" } else { "" };
        Some(format!("{sign}{int_part}.{frac_part}"))
    }

    /// Parse a number literal, reporting whether it was written exactly.
    ///
    /// Accepts integers (`-12`), decimals (`2.5`, `.5`), fractions (`5/2`,
    /// `3/-4`) and mixed numbers (`2 1/2`, `2又1/2`). The returned flag is
    /// `false` when any part of the literal was a decimal.
    pub fn parse_literal(input: &str) -> Result<(Self, bool), ParseRationalError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ParseRationalError::Empty);
        }

        let (negative, body) = match s.as_bytes()[0] {
            b'-' => (true, s[1..].trim_start()),
            b'+' => (false, s[1..].trim_start()),
            _ => (false, s),
        };
        if body.is_empty() {
            return Err(ParseRationalError::Invalid(s.to_string()));
        }

        let (value, exact) = if let Some((whole, frac)) = split_mixed(body) {
            let (whole, whole_exact) = parse_unsigned(whole, s)?;
            let (frac, frac_exact) = parse_fraction(frac, s)?
                .ok_or_else(|| ParseRationalError::Invalid(s.to_string()))?;
            if !whole.is_integer() || frac.is_negative() {
                return Err(ParseRationalError::Invalid(s.to_string()));
            }
            let sum = whole
                .checked_add(&frac)
                .ok_or_else(|| ParseRationalError::Overflow(s.to_string()))?;
            (sum, whole_exact && frac_exact)
        } else if let Some(parsed) = parse_fraction(body, s)? {
            parsed
        } else {
            parse_unsigned(body, s)?
        };

        let value = if negative {
            value
                .checked_neg()
                .ok_or_else(|| ParseRationalError::Overflow(s.to_string()))?
        } else {
            value
        };
        Ok((value, exact))
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        match (
            self.numer.checked_mul(other.denom),
            other.numer.checked_mul(self.denom),
        ) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            _ => self.to_f64().total_cmp(&other.to_f64()),
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

impl FromStr for Rational {
    type Err = ParseRationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_literal(s).map(|(value, _)| value)
    }
}

impl TryFrom<String> for Rational {
    type Error = ParseRationalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rational> for String {
    fn from(value: Rational) -> Self {
        value.to_string()
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(value as i128)
    }
}

fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    // gcd(0, 0) only happens for a zero denominator, which callers reject.
    i128::try_from(a.max(1)).unwrap_or(1)
}

fn isqrt(n: i128) -> Option<i128> {
    if n < 0 {
        return None;
    }
    let mut root = (n as f64).sqrt() as i128;
    while root > 0 && root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    (root * root == n).then_some(root)
}

/// Split `2 1/2` or `2又1/2` into whole and fractional parts.
fn split_mixed(body: &str) -> Option<(&str, &str)> {
    let (whole, frac) = body
        .split_once('又')
        .or_else(|| body.split_once(char::is_whitespace))?;
    let (whole, frac) = (whole.trim(), frac.trim());
    let whole_is_digits = !whole.is_empty() && whole.bytes().all(|b| b.is_ascii_digit());
    let frac_starts_with_digit = frac.bytes().next().is_some_and(|b| b.is_ascii_digit());
    (whole_is_digits && frac_starts_with_digit && frac.contains('/')).then_some((whole, frac))
}

/// Parse `a/b`. Returns `Ok(None)` when the body has no slash.
fn parse_fraction(body: &str, source: &str) -> Result<Option<(Rational, bool)>, ParseRationalError> {
    let Some((numer, denom)) = body.split_once('/') else {
        return Ok(None);
    };
    let (numer, numer_exact) = parse_unsigned(numer.trim(), source)?;
    let denom = denom.trim();
    let (denom_negative, denom) = match denom.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, denom),
    };
    let (denom, denom_exact) = parse_unsigned(denom, source)?;
    if denom == Rational::ZERO {
        return Err(ParseRationalError::DivisionByZero(source.to_string()));
    }
    let mut value = numer
        .checked_div(&denom)
        .ok_or_else(|| ParseRationalError::Overflow(source.to_string()))?;
    if denom_negative {
        value = value
            .checked_neg()
            .ok_or_else(|| ParseRationalError::Overflow(source.to_string()))?;
    }
    Ok(Some((value, numer_exact && denom_exact)))
}

/// Parse an unsigned integer or decimal such as `12`, `2.50`, `.5` or `5.`.
fn parse_unsigned(text: &str, source: &str) -> Result<(Rational, bool), ParseRationalError> {
    let invalid = || ParseRationalError::Invalid(source.to_string());
    let overflow = || ParseRationalError::Overflow(source.to_string());

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text, None),
    };
    let frac_digits = frac_part.unwrap_or("");
    if int_part.is_empty() && frac_digits.is_empty() {
        return Err(invalid());
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let mut numer: i128 = 0;
    for b in int_part.bytes().chain(frac_digits.bytes()) {
        numer = numer
            .checked_mul(10)
            .and_then(|n| n.checked_add(i128::from(b - b'0')))
            .ok_or_else(overflow)?;
    }
    let places = u32::try_from(frac_digits.len()).map_err(|_| overflow())?;
    let denom = 10i128.checked_pow(places).ok_or_else(overflow)?;
    let value = Rational::new(numer, denom).ok_or_else(overflow)?;
    Ok((value, frac_part.is_none()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i128, d: i128) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn new_reduces_and_normalizes_sign() {
        assert_eq!(r(4, 8), r(1, 2));
        assert_eq!(r(3, -6).numer(), -1);
        assert_eq!(r(3, -6).denom(), 2);
        assert!(Rational::new(1, 0).is_none());
    }

    #[test]
    fn parse_integers_and_decimals() {
        assert_eq!("-12".parse::<Rational>().unwrap(), Rational::from_integer(-12));
        assert_eq!("+3".parse::<Rational>().unwrap(), Rational::from_integer(3));
        assert_eq!("2.5".parse::<Rational>().unwrap(), r(5, 2));
        assert_eq!(".5".parse::<Rational>().unwrap(), r(1, 2));
        assert_eq!("5.".parse::<Rational>().unwrap(), Rational::from_integer(5));
        assert_eq!("0.50".parse::<Rational>().unwrap(), r(1, 2));
    }

    #[test]
    fn parse_reports_exactness() {
        assert!(Rational::parse_literal("5/2").unwrap().1);
        assert!(!Rational::parse_literal("2.5").unwrap().1);
        assert!(!Rational::parse_literal("1.5/3").unwrap().1);
    }

    #[test]
    fn parse_fractions_and_mixed_numbers() {
        assert_eq!("5/2".parse::<Rational>().unwrap(), r(5, 2));
        assert_eq!("-5/2".parse::<Rational>().unwrap(), r(-5, 2));
        assert_eq!("3/-4".parse::<Rational>().unwrap(), r(-3, 4));
        assert_eq!("2 1/2".parse::<Rational>().unwrap(), r(5, 2));
        assert_eq!("-2 1/2".parse::<Rational>().unwrap(), r(-5, 2));
        assert_eq!("2又1/2".parse::<Rational>().unwrap(), r(5, 2));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<Rational>(), Err(ParseRationalError::Empty));
        assert!(matches!(
            "1/0".parse::<Rational>(),
            Err(ParseRationalError::DivisionByZero(_))
        ));
        assert!("abc".parse::<Rational>().is_err());
        assert!("1.2.3".parse::<Rational>().is_err());
        assert!("-".parse::<Rational>().is_err());
        assert!("2 3".parse::<Rational>().is_err());
        assert!(matches!(
            "999999999999999999999999999999999999999999".parse::<Rational>(),
            Err(ParseRationalError::Overflow(_))
        ));
    }

    #[test]
    fn arithmetic_is_exact() {
        let third = r(1, 3);
        let sum = third.checked_add(&third).unwrap().checked_add(&third).unwrap();
        assert_eq!(sum, Rational::ONE);
        assert_eq!(r(1, 2).checked_sub(&r(1, 3)).unwrap(), r(1, 6));
        assert_eq!(r(2, 3).checked_mul(&r(3, 4)).unwrap(), r(1, 2));
        assert_eq!(r(1, 2).checked_div(&r(1, 4)).unwrap(), Rational::from_integer(2));
        assert!(r(1, 2).checked_div(&Rational::ZERO).is_none());
        assert_eq!(r(2, 3).checked_pow(-2).unwrap(), r(9, 4));
    }

    #[test]
    fn sqrt_of_perfect_squares_only() {
        assert_eq!(r(9, 4).sqrt_exact(), Some(r(3, 2)));
        assert_eq!(Rational::from_integer(2).sqrt_exact(), None);
        assert_eq!(Rational::from_integer(-4).sqrt_exact(), None);
    }

    #[test]
    fn ordering_and_display() {
        assert!(r(1, 3) < r(1, 2));
        assert!(r(-1, 2) < Rational::ZERO);
        assert_eq!(r(5, 2).to_string(), "5/2");
        assert_eq!(Rational::from_integer(-7).to_string(), "-7");
    }

    #[test]
    fn decimal_rendering() {
        assert_eq!(r(5, 4).to_decimal_string().as_deref(), Some("1.25"));
        assert_eq!(r(-1, 20).to_decimal_string().as_deref(), Some("-0.05"));
        assert_eq!(Rational::from_integer(3).to_decimal_string().as_deref(), Some("3"));
        assert_eq!(r(1, 3).to_decimal_string(), None);
    }

    #[test]
    fn serde_as_string() {
        let json = serde_json::to_string(&r(1, 1_000_000)).unwrap();
        assert_eq!(json, "\"1/1000000\"");
        let back: Rational = serde_json::from_str("\"0.01\"").unwrap();
        assert_eq!(back, r(1, 100));
    }
}
