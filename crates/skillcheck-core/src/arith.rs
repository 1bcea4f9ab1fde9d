//! Last-resort numeric coercion of symbolic answers.
//!
//! A small recursive-descent evaluator over exact rationals. It understands
//! `+ - * /`, integer powers with `^`, parentheses, unary signs, implicit
//! multiplication before `(` or `√`, and `√` of perfect squares. Anything
//! else (variables, `π`, irrational roots) is not a number and yields `None`.

use crate::rational::Rational;

/// Largest exponent magnitude the evaluator will compute.
const MAX_EXPONENT: i128 = 64;

/// Deepest nesting of signs, roots and parentheses the evaluator follows.
const MAX_DEPTH: usize = 64;

/// Evaluate `text` to an exact rational, if it is pure arithmetic.
pub fn evaluate(text: &str) -> Option<Rational> {
    let chars: Vec<char> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '×' | '·' => '*',
            '÷' => '/',
            other => other,
        })
        .collect();
    if chars.is_empty() {
        return None;
    }
    let mut parser = Parser {
        chars,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    (parser.pos == parser.chars.len()).then_some(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_word(&mut self, word: &str) -> bool {
        let len = word.chars().count();
        let matches = self.chars.len() >= self.pos + len
            && self.chars[self.pos..self.pos + len]
                .iter()
                .copied()
                .eq(word.chars());
        if matches {
            self.pos += len;
        }
        matches
    }

    fn expr(&mut self) -> Option<Rational> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value = value.checked_add(&self.term()?)?;
            } else if self.eat('-') {
                value = value.checked_sub(&self.term()?)?;
            } else {
                return Some(value);
            }
        }
    }

    fn term(&mut self) -> Option<Rational> {
        let mut value = self.unary()?;
        loop {
            if self.eat('*') {
                value = value.checked_mul(&self.unary()?)?;
            } else if self.eat('/') {
                value = value.checked_div(&self.unary()?)?;
            } else if matches!(self.peek(), Some('(') | Some('√')) {
                value = value.checked_mul(&self.power()?)?;
            } else {
                return Some(value);
            }
        }
    }

    /// Run `step` one nesting level deeper, giving up past `MAX_DEPTH`.
    fn nested(&mut self, step: fn(&mut Self) -> Option<Rational>) -> Option<Rational> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.depth += 1;
        let value = step(self);
        self.depth -= 1;
        value
    }

    fn unary(&mut self) -> Option<Rational> {
        self.nested(Self::signed)
    }

    fn signed(&mut self) -> Option<Rational> {
        if self.eat('-') {
            return self.unary()?.checked_neg();
        }
        if self.eat('+') {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Option<Rational> {
        let base = self.atom()?;
        if !self.eat('^') {
            return Some(base);
        }
        let exponent = self.unary()?;
        if !exponent.is_integer() || exponent.numer().abs() > MAX_EXPONENT {
            return None;
        }
        base.checked_pow(i32::try_from(exponent.numer()).ok()?)
    }

    fn atom(&mut self) -> Option<Rational> {
        self.nested(Self::primary)
    }

    fn primary(&mut self) -> Option<Rational> {
        if self.eat('(') {
            let value = self.expr()?;
            return self.eat(')').then_some(value);
        }
        if self.eat('√') || self.eat_word("sqrt") {
            return self.atom()?.sqrt_exact();
        }
        self.number()
    }

    fn number(&mut self) -> Option<Rational> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal.parse().ok()
    }
}
