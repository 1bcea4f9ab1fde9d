//! skillcheck CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "skillcheck", version, about = "Math answer checking and skill generation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a learner answer against a canonical answer
    Check {
        /// The learner's answer
        #[arg(long)]
        user: String,

        /// The canonical answer
        #[arg(long)]
        correct: String,

        /// Treat lists as ordered
        #[arg(long, conflicts_with = "unordered")]
        ordered: bool,

        /// Treat lists as unordered sets
        #[arg(long)]
        unordered: bool,

        /// Numeric tolerance (e.g. "1/100" or "0.001")
        #[arg(long)]
        tolerance: Option<String>,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show how an answer normalizes
    Normalize {
        /// Raw answer text
        raw: String,

        /// Treat lists as ordered
        #[arg(long)]
        ordered: bool,

        /// Print the normalized value as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a question from a skill
    Generate {
        /// Skill id (see `list-skills`)
        #[arg(long)]
        skill: String,

        /// Difficulty level
        #[arg(long, default_value = "1")]
        level: u32,

        /// Random seed for reproducible questions
        #[arg(long)]
        seed: Option<u64>,

        /// Print the question as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available skills
    ListSkills,

    /// Validate check-set TOML files
    Validate {
        /// Path to check-set file or directory
        #[arg(long)]
        check_set: PathBuf,
    },

    /// Grade check sets and write a report
    Grade {
        /// Path to .toml check set or directory
        #[arg(long)]
        check_set: PathBuf,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Filter by tags (comma-separated)
        #[arg(long)]
        filter: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Exit code 1 if any case disagrees with its expected verdict
        #[arg(long)]
        fail_on_mismatch: bool,
    },

    /// Compare two grading reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example check set
    Init,
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("skillcheck=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            user,
            correct,
            ordered,
            unordered,
            tolerance,
            json,
            config,
        } => commands::check::execute(commands::check::CheckArgs {
            user,
            correct,
            ordered: if ordered {
                Some(true)
            } else if unordered {
                Some(false)
            } else {
                None
            },
            tolerance,
            json,
            config,
        }),
        Commands::Normalize { raw, ordered, json } => {
            commands::normalize::execute(raw, ordered, json)
        }
        Commands::Generate {
            skill,
            level,
            seed,
            json,
        } => commands::generate::execute(skill, level, seed, json),
        Commands::ListSkills => commands::list_skills::execute(),
        Commands::Validate { check_set } => commands::validate::execute(check_set),
        Commands::Grade {
            check_set,
            output,
            filter,
            config,
            fail_on_mismatch,
        } => commands::grade::execute(check_set, output, filter, config, fail_on_mismatch),
        Commands::Compare {
            baseline,
            current,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, fail_on_regression, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
