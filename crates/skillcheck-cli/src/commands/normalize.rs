//! The `skillcheck normalize` command.

use anyhow::Result;

use skillcheck_core::normalize::{clean, AnswerNormalizer};

pub fn execute(raw: String, ordered: bool, json: bool) -> Result<()> {
    let normalizer = AnswerNormalizer::default().with_ordered_lists(ordered);
    let value = normalizer.normalize(&raw, None);

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("cleaned:   {}", clean(&raw));
    println!("kind:      {}", value.kind());
    println!("canonical: {value}");

    Ok(())
}
