//! TOML check-set parser.
//!
//! Loads check sets from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::feedback::is_graph_sentinel;
use crate::model::{CheckCase, CheckSet};
use crate::normalize::AnswerNormalizer;
use crate::rational::Rational;
use crate::registry::SkillRegistry;
use crate::value::NormalizedValue;

/// Intermediate TOML structure for parsing check-set files.
#[derive(Debug, Deserialize)]
struct TomlCheckFile {
    check_set: TomlCheckSetHeader,
    #[serde(default)]
    cases: Vec<TomlCheckCase>,
}

#[derive(Debug, Deserialize)]
struct TomlCheckSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlCheckCase {
    id: String,
    #[serde(default)]
    description: String,
    user_answer: String,
    correct_answer: String,
    #[serde(default = "default_true")]
    expect_correct: bool,
    #[serde(default)]
    skill: Option<String>,
    #[serde(default)]
    ordered: Option<bool>,
    #[serde(default)]
    tolerance: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Parse a single TOML file into a `CheckSet`.
pub fn parse_check_set(path: &Path) -> Result<CheckSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read check set file: {}", path.display()))?;

    parse_check_set_str(&content, path)
}

/// Parse a TOML string into a `CheckSet` (useful for testing).
pub fn parse_check_set_str(content: &str, source_path: &Path) -> Result<CheckSet> {
    let parsed: TomlCheckFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let cases = parsed
        .cases
        .into_iter()
        .map(|c| {
            let tolerance = c
                .tolerance
                .as_deref()
                .map(|raw| {
                    raw.parse::<Rational>()
                        .with_context(|| format!("case {}: invalid tolerance {raw:?}", c.id))
                })
                .transpose()?;
            if let Some(tolerance) = tolerance {
                anyhow::ensure!(
                    !tolerance.is_negative(),
                    "case {}: tolerance must not be negative",
                    c.id
                );
            }

            Ok(CheckCase {
                id: c.id,
                description: c.description,
                user_answer: c.user_answer,
                correct_answer: c.correct_answer,
                expect_correct: c.expect_correct,
                skill: c.skill,
                ordered: c.ordered,
                tolerance,
                tags: c.tags,
            })
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid check set: {}", source_path.display()))?;

    Ok(CheckSet {
        id: parsed.check_set.id,
        name: parsed.check_set.name,
        description: parsed.check_set.description,
        cases,
    })
}

/// Recursively load all `.toml` check-set files from a directory.
pub fn load_check_directory(dir: &Path) -> Result<Vec<CheckSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            sets.extend(load_check_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_check_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a single file or every check set under a directory.
pub fn load_check_sets(path: &Path) -> Result<Vec<CheckSet>> {
    if path.is_dir() {
        load_check_directory(path)
    } else {
        Ok(vec![parse_check_set(path)?])
    }
}

/// A warning from check-set validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The case ID (if applicable).
    pub case_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a check set for common issues.
pub fn validate_check_set(set: &CheckSet, registry: &SkillRegistry) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |case: &CheckCase, message: String| ValidationWarning {
        case_id: Some(case.id.clone()),
        message,
    };

    if set.cases.is_empty() {
        warnings.push(ValidationWarning {
            case_id: None,
            message: "check set has no cases".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for case in &set.cases {
        if !seen_ids.insert(&case.id) {
            warnings.push(warn(case, format!("duplicate case ID: {}", case.id)));
        }
    }

    let normalizer = AnswerNormalizer::default();
    for case in &set.cases {
        if case.correct_answer.trim().is_empty() {
            warnings.push(warn(case, "correct_answer is empty".into()));
        } else if is_graph_sentinel(&case.correct_answer) {
            if case.expect_correct {
                warnings.push(warn(
                    case,
                    "graph answers are never graded correct, but expect_correct is true".into(),
                ));
            }
        } else if let NormalizedValue::Symbolic(text) =
            normalizer.normalize(&case.correct_answer, None)
        {
            warnings.push(warn(
                case,
                format!("correct_answer only normalizes to symbolic text: {text}"),
            ));
        }

        if let Some(skill) = &case.skill {
            if let Err(e) = registry.get(skill) {
                warnings.push(warn(case, e.to_string()));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[check_set]
id = "core"
name = "Core"
description = "Equivalence rules"

[[cases]]
id = "decimal-vs-fraction"
user_answer = "2.5"
correct_answer = "5/2"
tags = ["numbers"]

[[cases]]
id = "roots-any-order"
user_answer = "-4 或 8"
correct_answer = "8, -4"
skill = "quadratic_roots"

[[cases]]
id = "coarse"
user_answer = "3.14"
correct_answer = "3.1416"
tolerance = "1/100"
ordered = false
"#;

    #[test]
    fn parse_valid_toml() {
        let set = parse_check_set_str(VALID_TOML, &PathBuf::from("core.toml")).unwrap();
        assert_eq!(set.id, "core");
        assert_eq!(set.name, "Core");
        assert_eq!(set.cases.len(), 3);
        assert!(set.cases[0].expect_correct);
        assert_eq!(set.cases[0].tags, vec!["numbers"]);
        assert_eq!(set.cases[1].skill.as_deref(), Some("quadratic_roots"));
        assert_eq!(set.cases[2].tolerance, Some(Rational::new(1, 100).unwrap()));
        assert_eq!(set.cases[2].ordered, Some(false));
    }

    #[test]
    fn parse_rejects_bad_tolerance() {
        let toml = r#"
[check_set]
id = "bad"
name = "Bad"

[[cases]]
id = "c"
user_answer = "1"
correct_answer = "1"
tolerance = "lots"
"#;
        let err = parse_check_set_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("invalid tolerance"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_check_set_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_reports_common_mistakes() {
        let toml = r#"
[check_set]
id = "mistakes"
name = "Mistakes"

[[cases]]
id = "same"
user_answer = "1"
correct_answer = "1"

[[cases]]
id = "same"
user_answer = "1"
correct_answer = ""

[[cases]]
id = "drawn"
user_answer = "y=x"
correct_answer = "graph"

[[cases]]
id = "prose"
user_answer = "x"
correct_answer = "2x+1"
expect_correct = false

[[cases]]
id = "ghost"
user_answer = "1"
correct_answer = "1"
skill = "no_such_skill"
"#;
        let set = parse_check_set_str(toml, &PathBuf::from("m.toml")).unwrap();
        let warnings = validate_check_set(&set, &SkillRegistry::with_builtin_skills());
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("duplicate")));
        assert!(messages.iter().any(|m| m.contains("correct_answer is empty")));
        assert!(messages.iter().any(|m| m.contains("never graded correct")));
        assert!(messages.iter().any(|m| m.contains("symbolic text: 2x+1")));
        assert!(messages.iter().any(|m| m.contains("unknown skill: no_such_skill")));
    }

    #[test]
    fn validate_clean_set() {
        let set = parse_check_set_str(VALID_TOML, &PathBuf::from("core.toml")).unwrap();
        assert!(validate_check_set(&set, &SkillRegistry::with_builtin_skills()).is_empty());
    }

    #[test]
    fn load_directory_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("core.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not [toml").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let sets = load_check_directory(dir.path()).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, "core");

        let single = load_check_sets(&dir.path().join("core.toml")).unwrap();
        assert_eq!(single.len(), 1);
    }
}
