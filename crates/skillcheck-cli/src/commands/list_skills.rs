//! The `skillcheck list-skills` command.

use anyhow::Result;

use skillcheck_core::SkillRegistry;

pub fn execute() -> Result<()> {
    let registry = SkillRegistry::with_builtin_skills();

    for skill in registry.iter() {
        let policy = skill.policy();
        let order = match policy.ordered {
            Some(true) => " [ordered]",
            Some(false) => " [unordered]",
            None => "",
        };
        println!("  {:<20} {}{order}", skill.id(), skill.title());
    }
    println!("\n{} skill(s) available.", registry.len());

    Ok(())
}
