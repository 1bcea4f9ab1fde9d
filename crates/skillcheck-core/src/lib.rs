//! skillcheck-core: answer normalization, equivalence checking, and skills.
//!
//! This crate defines the normalized answer model, the checker that compares
//! learner answers against canonical ones, the skill registry, and the
//! check-set grading engine built on top of them.

pub mod arith;
pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod rational;
pub mod registry;
pub mod report;
pub mod skills;
pub mod synonyms;
pub mod traits;
pub mod value;

pub use checker::{check, AnswerChecker, AnswerPolicy};
pub use feedback::Verdict;
pub use normalize::normalize;
pub use rational::Rational;
pub use registry::SkillRegistry;
pub use traits::{Question, SkillModule};
pub use value::{NormalizedValue, VariantHint};
