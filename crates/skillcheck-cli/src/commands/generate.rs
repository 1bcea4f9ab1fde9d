//! The `skillcheck generate` command.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use skillcheck_core::SkillRegistry;

pub fn execute(skill_id: String, level: u32, seed: Option<u64>, json: bool) -> Result<()> {
    anyhow::ensure!(level >= 1, "level must be at least 1");

    let registry = SkillRegistry::with_builtin_skills();
    let skill = registry.get(&skill_id)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let question = skill.generate(level, &mut rng);
    tracing::debug!(skill = %skill_id, level, ?seed, "generated question");

    if json {
        println!("{}", serde_json::to_string_pretty(&question)?);
        return Ok(());
    }

    println!("{} — level {level}", skill.title());
    println!();
    println!("{}", question.question_text.replace("<br>", "\n"));
    println!();
    println!("answer:         {}", question.answer.as_deref().unwrap_or_default());
    println!("correct_answer: {}", question.correct_answer);

    Ok(())
}
