//! Answer normalization.
//!
//! Turns a raw answer string into the most specific [`NormalizedValue`] it
//! matches. Normalization is total: anything that cannot be parsed becomes
//! [`NormalizedValue::Symbolic`].
//!
//! Pipeline:
//! 1. Cleaning: superscripts, Unicode NFKC folding, LaTeX stripping,
//!    separator words (`或`, `and`, ...), trailing punctuation.
//! 2. Bracketed wrappers: `(..)`/`[..]` ordered, `{..}` unordered.
//! 3. Labeled tuples: `x=3, y=-2`.
//! 4. Lists split on top-level `,` / `;`.
//! 5. Scalars: rational, `±n`, synonym token, letter choice, symbolic text.

use std::collections::BTreeMap;
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use crate::rational::Rational;
use crate::synonyms::SynonymTable;
use crate::value::{NormalizedValue, VariantHint};

/// Words that separate the members of a multi-value answer.
static SEPARATOR_WORDS: &[&str] = &["以及", "或者", "或是", "或", "和", "及", "與", "与"];

/// English separator words, matched as whole whitespace-delimited words.
static ENGLISH_SEPARATORS: &[&str] = &["or", "and"];

/// Deepest bracket or LaTeX group nesting that is parsed structurally.
const MAX_DEPTH: usize = 64;

/// Parses raw answers into normalized values.
#[derive(Debug, Clone)]
pub struct AnswerNormalizer {
    synonyms: Arc<SynonymTable>,
    ordered_lists: bool,
}

impl Default for AnswerNormalizer {
    fn default() -> Self {
        Self::new(Arc::new(SynonymTable::default()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListOrder {
    Ordered,
    Unordered,
}

impl AnswerNormalizer {
    pub fn new(synonyms: Arc<SynonymTable>) -> Self {
        Self {
            synonyms,
            ordered_lists: false,
        }
    }

    /// Treat bare comma lists as ordered unless a hint says otherwise.
    pub fn with_ordered_lists(mut self, ordered: bool) -> Self {
        self.ordered_lists = ordered;
        self
    }

    pub fn synonyms(&self) -> &Arc<SynonymTable> {
        &self.synonyms
    }

    /// Normalize `raw`, optionally guided by the canonical answer's shape.
    pub fn normalize(&self, raw: &str, hint: Option<VariantHint>) -> NormalizedValue {
        let cleaned = clean(raw);
        self.parse(&cleaned, hint, 0)
    }

    fn parse(&self, text: &str, hint: Option<VariantHint>, depth: usize) -> NormalizedValue {
        let text = text.trim();
        if text.is_empty() {
            return NormalizedValue::Symbolic(String::new());
        }
        if depth > MAX_DEPTH {
            return NormalizedValue::Symbolic(compact(text));
        }

        if let Some((open, inner)) = strip_wrapper(text) {
            if inner.trim().is_empty() {
                return NormalizedValue::Symbolic(compact(text));
            }
            return self.parse_wrapped(open, inner, hint, depth);
        }

        let items = split_top_level(text);
        if items.is_empty() {
            return NormalizedValue::Symbolic(compact(text));
        }
        if items.len() > 1 {
            if let Some(value) = self.parse_labeled(&items, hint, depth) {
                return value;
            }
            return self.build_list(&items, self.list_order(None, hint), depth);
        }

        if let Some(value) = self.parse_labeled(&items, hint, depth) {
            return value;
        }
        self.parse_scalar(text)
    }

    fn parse_wrapped(
        &self,
        open: char,
        inner: &str,
        hint: Option<VariantHint>,
        depth: usize,
    ) -> NormalizedValue {
        let items = split_top_level(inner);
        if items.len() <= 1 {
            // `(3)`, `(A)`, `{x=1}`: the brackets are just grouping.
            return self.parse(inner, hint, depth + 1);
        }
        if let Some(value) = self.parse_labeled(&items, hint, depth) {
            return value;
        }
        self.build_list(&items, self.list_order(Some(open), hint), depth)
    }

    fn list_order(&self, wrapper: Option<char>, hint: Option<VariantHint>) -> ListOrder {
        match (hint, wrapper) {
            (_, Some('{')) => ListOrder::Unordered,
            (Some(VariantHint::OrderedList), _) => ListOrder::Ordered,
            (Some(VariantHint::UnorderedSet), _) => ListOrder::Unordered,
            (_, Some(_)) => ListOrder::Ordered,
            (_, None) if self.ordered_lists => ListOrder::Ordered,
            _ => ListOrder::Unordered,
        }
    }

    fn build_list(&self, items: &[&str], order: ListOrder, depth: usize) -> NormalizedValue {
        let values: Vec<NormalizedValue> = items
            .iter()
            .map(|item| self.parse(item, None, depth + 1))
            .collect();
        match order {
            ListOrder::Ordered => NormalizedValue::ordered(values),
            ListOrder::Unordered => NormalizedValue::unordered(values),
        }
    }

    /// `x=3, y=-2` → tuple; `x=2, x=-3` and `x1=2, x2=-3` → the list of values.
    fn parse_labeled(
        &self,
        items: &[&str],
        hint: Option<VariantHint>,
        depth: usize,
    ) -> Option<NormalizedValue> {
        let pairs: Vec<(String, &str)> = items
            .iter()
            .map(|item| split_label(item))
            .collect::<Option<Vec<_>>>()?;

        let first = &pairs[0].0;
        let first_base = indexed_base(first);
        let one_variable = pairs.iter().all(|(name, _)| name == first)
            || (first_base.is_some()
                && pairs.iter().all(|(name, _)| indexed_base(name) == first_base));
        if pairs.len() > 1 && one_variable {
            let values: Vec<&str> = pairs.iter().map(|(_, value)| *value).collect();
            return Some(self.build_list(&values, self.list_order(None, hint), depth));
        }

        let mut fields = BTreeMap::new();
        for (name, value) in pairs {
            if fields.insert(name, self.parse(value, None, depth + 1)).is_some() {
                // Repeated names mixed with other names are not a tuple.
                return None;
            }
        }
        Some(NormalizedValue::LabeledTuple(fields))
    }

    fn parse_scalar(&self, text: &str) -> NormalizedValue {
        let number_text = text.strip_suffix('°').unwrap_or(text).trim();
        if let Ok((value, exact)) = Rational::parse_literal(number_text) {
            return NormalizedValue::Number { value, exact };
        }

        if let Some(rest) = text.strip_prefix('±') {
            if let Ok((value, exact)) = Rational::parse_literal(rest) {
                let negated = value.checked_neg().unwrap_or(value);
                return NormalizedValue::unordered(vec![
                    NormalizedValue::Number { value, exact },
                    NormalizedValue::Number {
                        value: negated,
                        exact,
                    },
                ]);
            }
        }

        if let Some(canonical) = self.synonyms.resolve(text) {
            return NormalizedValue::Token(canonical.to_string());
        }

        let compact = compact(text);
        let mut chars = compact.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            if letter.is_ascii_alphabetic() {
                let letter = if self.synonyms.case_insensitive() {
                    letter.to_ascii_uppercase()
                } else {
                    letter
                };
                return NormalizedValue::Token(letter.to_string());
            }
        }

        NormalizedValue::Symbolic(compact)
    }
}

/// Normalize with the default synonym table and list ordering.
pub fn normalize(raw: &str, hint: Option<VariantHint>) -> NormalizedValue {
    AnswerNormalizer::default().normalize(raw, hint)
}

// ============================================================================
// Cleaning
// ============================================================================

/// Produce the cleaned text every parse step works on.
pub fn clean(raw: &str) -> String {
    let superscripts = expand_superscripts(raw);
    let folded: String = superscripts.nfkc().collect();
    let folded = folded
        .replace(['\u{2212}', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}'], "-")
        .replace('\u{2044}', "/")
        .replace(['\u{3001}', '\u{FF64}'], ",");
    let latex = strip_latex(&folded);
    let latex = latex.replace("^°", "°").replace(">=", "≥").replace("<=", "≤");

    let mut text = latex;
    for word in SEPARATOR_WORDS {
        text = text.replace(word, ",");
    }
    let words: Vec<&str> = text
        .split_whitespace()
        .map(|word| {
            if ENGLISH_SEPARATORS.iter().any(|sep| word.eq_ignore_ascii_case(sep)) {
                ","
            } else {
                word
            }
        })
        .collect();
    let text = words.join(" ");
    trim_trailing_punctuation(&text).to_string()
}

fn trim_trailing_punctuation(text: &str) -> &str {
    let mut text = text.trim();
    loop {
        let Some(last) = text.chars().last() else {
            return text;
        };
        let before = &text[..text.len() - last.len_utf8()];
        let strip = match last {
            '。' | '!' | '?' => true,
            '.' => !before.chars().last().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        };
        if !strip {
            return text;
        }
        text = before.trim_end();
    }
}

fn expand_superscripts(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut run = String::new();
    for c in raw.chars() {
        match superscript_digit(c) {
            Some(d) => run.push(d),
            None => {
                flush_superscript(&mut out, &mut run);
                out.push(c);
            }
        }
    }
    flush_superscript(&mut out, &mut run);
    out
}

fn flush_superscript(out: &mut String, run: &mut String) {
    if run.is_empty() {
        return;
    }
    if run.chars().count() == 1 {
        out.push('^');
        out.push_str(run);
    } else {
        out.push_str("^(");
        out.push_str(run);
        out.push(')');
    }
    run.clear();
}

fn superscript_digit(c: char) -> Option<char> {
    Some(match c {
        '⁰' => '0',
        '¹' => '1',
        '²' => '2',
        '³' => '3',
        '⁴' => '4',
        '⁵' => '5',
        '⁶' => '6',
        '⁷' => '7',
        '⁸' => '8',
        '⁹' => '9',
        '⁻' => '-',
        _ => return None,
    })
}

// ============================================================================
// LaTeX
// ============================================================================

/// Strip LaTeX markup down to plain answer text.
pub fn strip_latex(input: &str) -> String {
    strip_latex_at(input, 0)
}

/// Groups nested deeper than `MAX_DEPTH` are kept as written.
fn strip_latex_at(input: &str, depth: usize) -> String {
    if depth > MAX_DEPTH {
        return input.to_string();
    }
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '$' => i += 1,
            '\\' => {
                let (command, next) = read_command(&chars, i + 1);
                i = expand_command(&command, &chars, next, &mut out, depth);
            }
            '^' | '_' if chars.get(i + 1) == Some(&'{') => {
                let (group, next) = read_group(&chars, i + 1);
                let inner = strip_latex_at(&group, depth + 1);
                out.push(chars[i]);
                push_grouped(&mut out, &inner);
                i = next;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Read a command name after a backslash: letters, or one other character.
fn read_command(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_alphabetic() {
        end += 1;
    }
    if end == start && start < chars.len() {
        end = start + 1;
    }
    (chars[start..end].iter().collect(), end)
}

/// Read a `{...}` group (or a single character) starting at `start`.
fn read_group(chars: &[char], start: usize) -> (String, usize) {
    let mut i = start;
    while i < chars.len() && chars[i] == ' ' {
        i += 1;
    }
    if i >= chars.len() {
        return (String::new(), i);
    }
    if chars[i] != '{' {
        return (chars[i].to_string(), i + 1);
    }
    let mut depth = 0usize;
    let mut j = i;
    while j < chars.len() {
        match chars[j] {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (chars[i + 1..j].iter().collect(), j + 1);
                }
            }
            _ => {}
        }
        j += 1;
    }
    // Unbalanced: take the rest.
    (chars[i + 1..].iter().collect(), chars.len())
}

/// Read an optional `[...]` argument.
fn read_optional(chars: &[char], start: usize) -> (Option<String>, usize) {
    if chars.get(start) != Some(&'[') {
        return (None, start);
    }
    match chars[start..].iter().position(|&c| c == ']') {
        Some(offset) => (
            Some(chars[start + 1..start + offset].iter().collect()),
            start + offset + 1,
        ),
        None => (None, start),
    }
}

fn expand_command(
    command: &str,
    chars: &[char],
    next: usize,
    out: &mut String,
    depth: usize,
) -> usize {
    let symbol = match command {
        "frac" | "dfrac" | "tfrac" | "cfrac" => {
            let (numer, after_numer) = read_group(chars, next);
            let (denom, after_denom) = read_group(chars, after_numer);
            let (numer, denom) = (
                strip_latex_at(&numer, depth + 1),
                strip_latex_at(&denom, depth + 1),
            );
            if out.chars().last().is_some_and(|c| c.is_ascii_digit()) {
                out.push(' ');
            }
            if is_simple_operand(&numer) && is_simple_operand(&denom) {
                out.push_str(numer.trim());
                out.push('/');
                out.push_str(denom.trim());
            } else {
                out.push('(');
                out.push_str(numer.trim());
                out.push_str(")/(");
                out.push_str(denom.trim());
                out.push(')');
            }
            return after_denom;
        }
        "sqrt" => {
            let (index, after_index) = read_optional(chars, next);
            let (radicand, after) = read_group(chars, after_index);
            let radicand = strip_latex_at(&radicand, depth + 1);
            match index {
                Some(index) => {
                    out.push_str("√[");
                    out.push_str(index.trim());
                    out.push(']');
                }
                None => out.push('√'),
            }
            push_grouped(out, &radicand);
            return after;
        }
        "text" | "textrm" | "mathrm" | "mbox" | "mathbf" | "boldsymbol" | "operatorname" => {
            let (inner, after) = read_group(chars, next);
            out.push_str(&strip_latex_at(&inner, depth + 1));
            return after;
        }
        "left" | "right" | "big" | "Big" | "bigl" | "bigr" | "Bigl" | "Bigr" | "displaystyle"
        | "limits" | "!" | "(" | ")" | "[" | "]" => "",
        "," | ";" | ":" | " " | "quad" | "qquad" => " ",
        "{" => "{",
        "}" => "}",
        "%" => "%",
        "pm" => "±",
        "mp" => "∓",
        "times" | "cdot" => "*",
        "div" => "/",
        "le" | "leq" | "leqslant" => "≤",
        "ge" | "geq" | "geqslant" => "≥",
        "ne" | "neq" => "≠",
        "approx" => "≈",
        "pi" => "π",
        "infty" => "∞",
        "circ" | "degree" => "°",
        "emptyset" | "varnothing" => "∅",
        "angle" => "∠",
        "triangle" => "△",
        "in" => "∈",
        "cup" => "∪",
        "cap" => "∩",
        _ => {
            out.push('\\');
            out.push_str(command);
            return next;
        }
    };
    out.push_str(symbol);
    next
}

fn is_simple_operand(text: &str) -> bool {
    let body = text.trim();
    let body = body.strip_prefix('-').unwrap_or(body);
    !body.is_empty() && body.chars().all(|c| c.is_alphanumeric() || c == '.')
}

fn push_grouped(out: &mut String, inner: &str) {
    let inner = inner.trim();
    if inner.chars().count() == 1 || (is_simple_operand(inner) && !inner.starts_with('-')) {
        out.push_str(inner);
    } else {
        out.push('(');
        out.push_str(inner);
        out.push(')');
    }
}

// ============================================================================
// Structure helpers
// ============================================================================

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn closing_for(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

/// If the whole text is one bracketed group, return the bracket and inside.
fn strip_wrapper(text: &str) -> Option<(char, &str)> {
    let open = text.chars().next()?;
    let close = closing_for(open)?;
    if !text.ends_with(close) || text.len() < 2 {
        return None;
    }
    let mut depth = 0i32;
    for (idx, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                if depth == 0 && idx + c.len_utf8() != text.len() {
                    return None;
                }
            }
            _ => {}
        }
    }
    (depth == 0).then(|| (open, &text[open.len_utf8()..text.len() - close.len_utf8()]))
}

/// Split on `,` and `;` outside of brackets, dropping empty items.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' | ';' if depth == 0 => {
                items.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    items.push(&text[start..]);
    items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// `x1` → `x`: the variable behind an indexed label.
fn indexed_base(name: &str) -> Option<&str> {
    let base = name.trim_end_matches(|c: char| c.is_ascii_digit());
    (!base.is_empty() && base.len() < name.len()).then_some(base)
}

/// Split `name = value` where name is an identifier such as `x`, `x_1`, `y'`.
fn split_label(item: &str) -> Option<(String, &str)> {
    let (name, value) = item.split_once('=')?;
    let value = value.trim();
    if value.is_empty() || value.contains('=') {
        return None;
    }
    let name: String = name
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '_' | '{' | '}'))
        .collect();
    let mut chars = name.chars();
    let first = chars.next()?;
    let valid = first.is_alphabetic() && chars.all(|c| c.is_alphanumeric() || c == '\'');
    valid.then_some((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(num: i128, den: i128) -> NormalizedValue {
        NormalizedValue::exact(Rational::new(num, den).unwrap())
    }

    #[test]
    fn clean_strips_latex_wrappers() {
        assert_eq!(clean("$\\frac{1}{2}$"), "1/2");
        assert_eq!(clean("$2\\frac{1}{2}$"), "2 1/2");
        assert_eq!(clean("\\(x^{2}\\)"), "x^2");
        assert_eq!(clean("\\frac{x+1}{2}"), "(x+1)/(2)");
        assert_eq!(clean("\\sqrt{2}"), "√2");
        assert_eq!(clean("\\sqrt{x+1}"), "√(x+1)");
        assert_eq!(clean("\\left( 1, 2 \\right)"), "( 1, 2 )");
        assert_eq!(clean("30^\\circ"), "30°");
        assert_eq!(clean("\\text{是}"), "是");
        assert_eq!(clean("x \\geq 3"), "x ≥ 3");
    }

    #[test]
    fn clean_folds_fullwidth_and_separators() {
        assert_eq!(clean("８，－４"), "8,-4");
        assert_eq!(clean("-4 或 8"), "-4 , 8");
        assert_eq!(clean("2 and 3"), "2 , 3");
        assert_eq!(clean("x²"), "x^2");
        assert_eq!(clean("是。"), "是");
        assert_eq!(clean("5."), "5.");
    }

    #[test]
    fn numbers_in_every_format() {
        assert_eq!(normalize("5", None), n(5, 1));
        assert_eq!(normalize(" 5/2 ", None), n(5, 2));
        assert_eq!(normalize("1 / 2", None), n(1, 2));
        assert_eq!(normalize("$\\frac{5}{2}$", None), n(5, 2));
        assert_eq!(normalize("2又1/2", None), n(5, 2));
        assert_eq!(normalize("(3)", None), n(3, 1));
        assert_eq!(normalize("60°", None), n(60, 1));
        assert_eq!(
            normalize("2.5", None),
            NormalizedValue::decimal(Rational::new(5, 2).unwrap())
        );
    }

    #[test]
    fn division_by_zero_is_symbolic() {
        assert_eq!(normalize("1/0", None), NormalizedValue::symbolic("1/0"));
    }

    #[test]
    fn lists_default_to_unordered() {
        assert_eq!(
            normalize("8,-4", None),
            NormalizedValue::unordered(vec![n(8, 1), n(-4, 1)])
        );
        assert_eq!(
            normalize("8 或 -4", None),
            NormalizedValue::unordered(vec![n(8, 1), n(-4, 1)])
        );
    }

    #[test]
    fn brackets_and_hints_decide_order() {
        assert_eq!(
            normalize("(3, -2)", None),
            NormalizedValue::ordered(vec![n(3, 1), n(-2, 1)])
        );
        assert_eq!(
            normalize("3, -2", Some(VariantHint::OrderedList)),
            NormalizedValue::ordered(vec![n(3, 1), n(-2, 1)])
        );
        assert_eq!(
            normalize("(8, -4)", Some(VariantHint::UnorderedSet)),
            NormalizedValue::unordered(vec![n(8, 1), n(-4, 1)])
        );
        assert_eq!(
            normalize("\\{1, 2\\}", Some(VariantHint::OrderedList)),
            NormalizedValue::unordered(vec![n(1, 1), n(2, 1)])
        );
    }

    #[test]
    fn ordered_lists_config() {
        let normalizer = AnswerNormalizer::default().with_ordered_lists(true);
        assert_eq!(
            normalizer.normalize("1, 2", None),
            NormalizedValue::ordered(vec![n(1, 1), n(2, 1)])
        );
    }

    #[test]
    fn coordinate_sets() {
        let value = normalize("(1,2),(3,4)", None);
        assert_eq!(
            value,
            NormalizedValue::unordered(vec![
                NormalizedValue::ordered(vec![n(1, 1), n(2, 1)]),
                NormalizedValue::ordered(vec![n(3, 1), n(4, 1)]),
            ])
        );
    }

    #[test]
    fn labeled_tuples() {
        assert_eq!(
            normalize("x=3, y=-2", None),
            NormalizedValue::labeled([("x", n(3, 1)), ("y", n(-2, 1))])
        );
        assert_eq!(
            normalize("x_{1} = \\frac{1}{2}", None),
            NormalizedValue::labeled([("x1", n(1, 2))])
        );
        assert_eq!(
            normalize("y = 2x + 1", None),
            NormalizedValue::labeled([("y", NormalizedValue::symbolic("2x+1"))])
        );
    }

    #[test]
    fn repeated_label_is_a_list_of_values() {
        assert_eq!(
            normalize("x=2 或 x=-3", None),
            NormalizedValue::unordered(vec![n(2, 1), n(-3, 1)])
        );
    }

    #[test]
    fn indexed_labels_of_one_variable_are_a_list_of_values() {
        assert_eq!(
            normalize("x1 = 8, x2 = -4", None),
            NormalizedValue::unordered(vec![n(8, 1), n(-4, 1)])
        );
        assert_eq!(
            normalize("x_{1}=8 或 x_{2}=-4", None),
            NormalizedValue::unordered(vec![n(8, 1), n(-4, 1)])
        );
        assert_eq!(
            normalize("x1=3, y1=4", None),
            NormalizedValue::labeled([("x1", n(3, 1)), ("y1", n(4, 1))])
        );
    }

    #[test]
    fn deep_nesting_falls_back_to_symbolic() {
        let parens = format!("{}5{}", "(".repeat(50_000), ")".repeat(50_000));
        assert!(matches!(normalize(&parens, None), NormalizedValue::Symbolic(_)));

        let sets = format!("{}1, 2{}", "{".repeat(5_000), "}".repeat(5_000));
        assert!(matches!(normalize(&sets, None), NormalizedValue::Symbolic(_)));

        let signs = format!("{}5", "-".repeat(20_000));
        assert!(matches!(normalize(&signs, None), NormalizedValue::Symbolic(_)));

        assert_eq!(normalize("((((5))))", None), n(5, 1));
    }

    #[test]
    fn deep_latex_groups_are_kept_as_written() {
        let powers = format!("x{}2{}", "^{".repeat(20_000), "}".repeat(20_000));
        assert!(clean(&powers).starts_with("x^"));

        let fracs = format!("{}1{}", "\\frac{".repeat(10_000), "}{2}".repeat(10_000));
        assert!(!clean(&fracs).is_empty());

        assert_eq!(clean("x^{2^{3}}"), "x^(2^3)");
    }

    #[test]
    fn plus_minus_expands_to_both_signs() {
        assert_eq!(
            normalize("x = \\pm 2", None),
            NormalizedValue::labeled([("x", NormalizedValue::unordered(vec![n(2, 1), n(-2, 1)]))])
        );
    }

    #[test]
    fn tokens_and_letter_choices() {
        assert_eq!(normalize("會", None), NormalizedValue::token("是"));
        assert_eq!(normalize("一樣大", None), NormalizedValue::token("="));
        assert_eq!(normalize("a", None), NormalizedValue::token("A"));
        assert_eq!(normalize("(B)", None), NormalizedValue::token("B"));
        assert_eq!(normalize("\\emptyset", None), NormalizedValue::token("無解"));
    }

    #[test]
    fn symbolic_fallback_is_compacted() {
        assert_eq!(normalize("2 x + 1", None), NormalizedValue::symbolic("2x+1"));
        assert_eq!(normalize("\\sqrt{2}", None), NormalizedValue::symbolic("√2"));
        assert_eq!(normalize("", None), NormalizedValue::symbolic(""));
    }

    #[test]
    fn display_reparses_to_same_value() {
        for raw in [
            "5", "2.5", "-7/3", "8, -4", "(3, -2)", "x=1, y=2", "(1,2),(3,4)", "是", "A",
            "2x+1", "x=±2", "{1, 2}, 3", "8, 8", "8.0", "8, 8.0, -4", "x1=8, x2=-4",
        ] {
            let first = normalize(raw, None);
            let second = normalize(&first.to_string(), None);
            assert_eq!(first, second, "round trip changed {raw:?} via {first}");
        }
    }
}
