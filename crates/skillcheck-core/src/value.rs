//! The normalized answer model.
//!
//! Every raw answer string, learner-typed or generator-produced, is turned
//! into a [`NormalizedValue`] before comparison. Values are immutable once
//! built and render back to a canonical, re-parseable string via `Display`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rational::Rational;

/// A parsed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NormalizedValue {
    /// An exact rational. `exact` is false when any part was written as a decimal.
    Number { value: Rational, exact: bool },
    /// Position-sensitive items, e.g. a coordinate `(3, -2)`.
    OrderedList(Vec<NormalizedValue>),
    /// Order-insensitive items, e.g. roots `8 或 -4`. Never holds duplicates.
    UnorderedSet(Vec<NormalizedValue>),
    /// Named fields, e.g. `x=3, y=-2`.
    LabeledTuple(BTreeMap<String, NormalizedValue>),
    /// A categorical answer resolved to its canonical synonym.
    Token(String),
    /// Anything else, kept as compacted text.
    Symbolic(String),
}

/// The shape of a canonical answer, used to parse user input consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantHint {
    Number,
    OrderedList,
    UnorderedSet,
    LabeledTuple,
    Token,
    Symbolic,
}

impl VariantHint {
    /// Derive the hint from an already-normalized canonical answer.
    pub fn of(value: &NormalizedValue) -> Self {
        value.kind()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VariantHint::Number => "number",
            VariantHint::OrderedList => "ordered_list",
            VariantHint::UnorderedSet => "unordered_set",
            VariantHint::LabeledTuple => "labeled_tuple",
            VariantHint::Token => "token",
            VariantHint::Symbolic => "symbolic",
        }
    }
}

impl fmt::Display for VariantHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NormalizedValue {
    pub fn exact(value: Rational) -> Self {
        NormalizedValue::Number { value, exact: true }
    }

    pub fn decimal(value: Rational) -> Self {
        NormalizedValue::Number {
            value,
            exact: false,
        }
    }

    pub fn integer(value: i64) -> Self {
        Self::exact(Rational::from(value))
    }

    pub fn ordered(items: Vec<NormalizedValue>) -> Self {
        NormalizedValue::OrderedList(items)
    }

    /// Build a set, collapsing repeated items. Numbers collapse by value, so
    /// `8, 8.0` is one item. A set left with one item is that item.
    pub fn unordered(items: Vec<NormalizedValue>) -> Self {
        let mut unique: Vec<NormalizedValue> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.iter().any(|kept| kept.same_item(&item)) {
                unique.push(item);
            }
        }
        if unique.len() == 1 {
            if let Some(only) = unique.pop() {
                return only;
            }
        }
        NormalizedValue::UnorderedSet(unique)
    }

    fn same_item(&self, other: &NormalizedValue) -> bool {
        match (self, other) {
            (NormalizedValue::Number { value: a, .. }, NormalizedValue::Number { value: b, .. }) => {
                a == b
            }
            _ => self == other,
        }
    }

    pub fn labeled<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, NormalizedValue)>,
    {
        NormalizedValue::LabeledTuple(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn token(text: impl Into<String>) -> Self {
        NormalizedValue::Token(text.into())
    }

    pub fn symbolic(text: impl Into<String>) -> Self {
        NormalizedValue::Symbolic(text.into())
    }

    pub fn kind(&self) -> VariantHint {
        match self {
            NormalizedValue::Number { .. } => VariantHint::Number,
            NormalizedValue::OrderedList(_) => VariantHint::OrderedList,
            NormalizedValue::UnorderedSet(_) => VariantHint::UnorderedSet,
            NormalizedValue::LabeledTuple(_) => VariantHint::LabeledTuple,
            NormalizedValue::Token(_) => VariantHint::Token,
            NormalizedValue::Symbolic(_) => VariantHint::Symbolic,
        }
    }

    pub fn as_number(&self) -> Option<Rational> {
        match self {
            NormalizedValue::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// `false` only for the symbolic fallback.
    pub fn is_structured(&self) -> bool {
        !matches!(self, NormalizedValue::Symbolic(_))
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedValue::Number { value, exact } => {
                match (exact, value.to_decimal_string()) {
                    // `8.0` stays a decimal when re-parsed.
                    (false, Some(decimal)) if !decimal.contains('.') => write!(f, "{decimal}.0"),
                    (false, Some(decimal)) => f.write_str(&decimal),
                    _ => write!(f, "{value}"),
                }
            }
            NormalizedValue::OrderedList(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                f.write_str(")")
            }
            NormalizedValue::UnorderedSet(items) => write_items(f, items),
            NormalizedValue::LabeledTuple(fields) => {
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}=")?;
                    write_nested(f, value)?;
                }
                Ok(())
            }
            NormalizedValue::Token(text) | NormalizedValue::Symbolic(text) => f.write_str(text),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[NormalizedValue]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_nested(f, item)?;
    }
    Ok(())
}

/// Collections nested inside another value need their own delimiters.
fn write_nested(f: &mut fmt::Formatter<'_>, value: &NormalizedValue) -> fmt::Result {
    match value {
        NormalizedValue::UnorderedSet(_) | NormalizedValue::LabeledTuple(_) => {
            write!(f, "{{{value}}}")
        }
        _ => write!(f, "{value}"),
    }
}
