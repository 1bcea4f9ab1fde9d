//! The `skillcheck init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    let config_path = Path::new("skillcheck.toml");
    if config_path.exists() {
        println!("skillcheck.toml already exists, skipping.");
    } else {
        std::fs::write(config_path, SAMPLE_CONFIG).context("failed to write skillcheck.toml")?;
        println!("Created skillcheck.toml");
    }

    std::fs::create_dir_all("check-sets")?;
    let example_path = Path::new("check-sets/example.toml");
    if example_path.exists() {
        println!("check-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CHECK_SET)
            .context("failed to write check-sets/example.toml")?;
        println!("Created check-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit skillcheck.toml to add synonyms or change the tolerance");
    println!("  2. Run: skillcheck validate --check-set check-sets/example.toml");
    println!("  3. Run: skillcheck grade --check-set check-sets/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# skillcheck configuration

# Numeric tolerance as a fraction or decimal string.
tolerance = "1/1000000"

# Treat bare comma lists ("3, -2") as ordered.
ordered_lists = false

case_insensitive_tokens = true

# Set to true to use only the synonym groups below.
replace_default_synonyms = false

output_dir = "./skillcheck-results"

[[synonyms]]
canonical = "銳角"
aliases = ["acute", "acute angle"]
"#;

const EXAMPLE_CHECK_SET: &str = r#"[check_set]
id = "example"
name = "Example Check Set"
description = "A few fixtures to get started"

[[cases]]
id = "decimal-vs-fraction"
description = "Decimals and fractions with the same value agree"
user_answer = "2.5"
correct_answer = "5/2"
tags = ["numbers"]

[[cases]]
id = "roots-any-order"
user_answer = "-4 或 8"
correct_answer = "8, -4"
skill = "quadratic_roots"
tags = ["sets"]

[[cases]]
id = "swapped-solution"
user_answer = "x=2, y=3"
correct_answer = "x=3, y=2"
expect_correct = false
tags = ["tuples"]

[[cases]]
id = "yes-synonym"
user_answer = "會"
correct_answer = "是"
tags = ["synonyms"]
"#;
