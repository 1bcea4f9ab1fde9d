//! Categorical answer synonyms.
//!
//! A token answer such as `是` may be typed as `會`, `對` or `yes`. The table
//! maps every alias to one canonical token so both sides of a comparison
//! resolve to the same text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Built-in groups
// ============================================================================

/// Default (canonical, aliases) groups. Aliases are matched after whitespace
/// removal, so multi-word aliases are listed without spaces.
static DEFAULT_GROUPS: &[(&str, &[&str])] = &[
    (
        "是",
        &["會", "会", "對", "对", "yes", "true", "正確", "正确", "成立", "可以", "能", "有"],
    ),
    (
        "否",
        &[
            "不是", "不會", "不会", "不對", "不对", "no", "false", "錯", "错", "不正確", "不正确",
            "不成立", "不可以", "不能", "沒有", "没有",
        ],
    ),
    (">", &["大於", "大于", "較大", "较大", "greater", "greaterthan"]),
    ("<", &["小於", "小于", "較小", "较小", "less", "lessthan"]),
    (
        "=",
        &["相等", "等於", "等于", "一樣大", "一样大", "相同", "equal", "equals", "same"],
    ),
    ("無解", &["无解", "∅", "nosolution", "none"]),
    (
        "無限多解",
        &["无限多解", "無窮多解", "无穷多解", "infinitelymany", "infinitelymanysolutions"],
    ),
];

/// A synonym group as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymGroup {
    /// The token every alias resolves to.
    pub canonical: String,
    /// Alternative spellings.
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Alias → canonical token lookup.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    lookup: HashMap<String, String>,
    case_insensitive: bool,
}

impl SynonymTable {
    pub fn empty(case_insensitive: bool) -> Self {
        Self {
            lookup: HashMap::new(),
            case_insensitive,
        }
    }

    /// The built-in table.
    pub fn builtin(case_insensitive: bool) -> Self {
        let mut table = Self::empty(case_insensitive);
        for (canonical, aliases) in DEFAULT_GROUPS {
            table.insert(canonical, canonical);
            for alias in *aliases {
                table.insert(alias, canonical);
            }
        }
        table
    }

    /// Add a group. Later groups override earlier aliases.
    pub fn add_group(&mut self, group: &SynonymGroup) {
        self.insert(&group.canonical, &group.canonical);
        for alias in &group.aliases {
            self.insert(alias, &group.canonical);
        }
    }

    /// Resolve text to its canonical token, if the text is a known alias.
    pub fn resolve(&self, text: &str) -> Option<&str> {
        self.lookup.get(&self.key(text)).map(String::as_str)
    }

    /// Resolve text, falling back to the text itself.
    pub fn canonicalize(&self, text: &str) -> String {
        match self.resolve(text) {
            Some(canonical) => canonical.to_string(),
            None => self.key(text),
        }
    }

    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    fn insert(&mut self, alias: &str, canonical: &str) {
        let key = self.key(alias);
        if !key.is_empty() {
            self.lookup.insert(key, canonical.to_string());
        }
    }

    fn key(&self, text: &str) -> String {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if self.case_insensitive {
            compact.to_lowercase()
        } else {
            compact
        }
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::builtin(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_chinese_and_english() {
        let table = SynonymTable::default();
        assert_eq!(table.resolve("會"), Some("是"));
        assert_eq!(table.resolve("YES"), Some("是"));
        assert_eq!(table.resolve("不會"), Some("否"));
        assert_eq!(table.resolve("一樣大"), Some("="));
        assert_eq!(table.resolve("相等"), Some("="));
        assert_eq!(table.resolve("greater than"), Some(">"));
        assert_eq!(table.resolve("銳角"), None);
    }

    #[test]
    fn case_sensitive_table_keeps_case() {
        let table = SynonymTable::builtin(false);
        assert_eq!(table.resolve("yes"), Some("是"));
        assert_eq!(table.resolve("Yes"), None);
    }

    #[test]
    fn custom_group_overrides_builtin() {
        let mut table = SynonymTable::default();
        table.add_group(&SynonymGroup {
            canonical: "相同".into(),
            aliases: vec!["一樣大".into()],
        });
        assert_eq!(table.resolve("一樣大"), Some("相同"));
        assert_eq!(table.resolve("相等"), Some("="));
    }

    #[test]
    fn canonicalize_falls_back_to_key() {
        let table = SynonymTable::default();
        assert_eq!(table.canonicalize(" Obtuse "), "obtuse");
        assert_eq!(table.canonicalize("對"), "是");
    }
}
