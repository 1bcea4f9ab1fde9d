//! The `skillcheck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use skillcheck_core::parser::{load_check_sets, validate_check_set};
use skillcheck_core::SkillRegistry;

pub fn execute(check_set_path: PathBuf) -> Result<()> {
    let sets = load_check_sets(&check_set_path)?;
    anyhow::ensure!(
        !sets.is_empty(),
        "no check sets found in {}",
        check_set_path.display()
    );
    let registry = SkillRegistry::with_builtin_skills();

    let mut total_warnings = 0;

    for set in &sets {
        println!("Check set: {} ({} cases)", set.name, set.cases.len());

        let warnings = validate_check_set(set, &registry);
        for w in &warnings {
            let prefix = w
                .case_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All check sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
