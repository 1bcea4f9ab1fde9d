//! The `skillcheck check` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use skillcheck_core::checker::{AnswerChecker, AnswerPolicy};
use skillcheck_core::config::load_config_from;
use skillcheck_core::Rational;

pub struct CheckArgs {
    pub user: String,
    pub correct: String,
    pub ordered: Option<bool>,
    pub tolerance: Option<String>,
    pub json: bool,
    pub config: Option<PathBuf>,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let checker = AnswerChecker::from_config(&config);

    let tolerance = args
        .tolerance
        .as_deref()
        .map(|raw| {
            raw.parse::<Rational>()
                .with_context(|| format!("invalid tolerance: {raw:?}"))
        })
        .transpose()?;
    if let Some(tolerance) = tolerance {
        anyhow::ensure!(!tolerance.is_negative(), "tolerance must not be negative");
    }
    let policy = AnswerPolicy {
        ordered: args.ordered,
        tolerance,
    };

    let assessment = checker.assess(&args.user, &args.correct, &policy);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment.verdict)?);
        return Ok(());
    }

    println!(
        "{}",
        if assessment.verdict.correct {
            "CORRECT"
        } else {
            "INCORRECT"
        }
    );
    println!("{}", assessment.verdict.result);
    if let Some(evaluation) = &assessment.evaluation {
        println!();
        println!("  canonical: {} ({})", evaluation.correct, evaluation.correct.kind());
        println!("  answer:    {} ({})", evaluation.user, evaluation.user.kind());
    }

    Ok(())
}
