//! Typed library errors.
//!
//! The grading path itself never fails: unparseable answers degrade to a
//! symbolic value. These errors cover the typed edges of the crate, such as
//! parsing a rational from configuration or looking up a skill.

use thiserror::Error;

/// Errors produced when parsing a rational number literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRationalError {
    /// The input was empty after trimming.
    #[error("empty number literal")]
    Empty,

    /// The input is not an integer, decimal, fraction, or mixed number.
    #[error("invalid number literal: {0}")]
    Invalid(String),

    /// A fraction had a zero denominator.
    #[error("division by zero in number literal: {0}")]
    DivisionByZero(String),

    /// The value does not fit in 128-bit arithmetic.
    #[error("number literal out of range: {0}")]
    Overflow(String),
}

/// Errors raised by the skill registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No skill is registered under the requested id.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// A skill with the same id is already registered.
    #[error("duplicate skill id: {0}")]
    DuplicateSkill(String),
}

impl RegistryError {
    /// Returns the skill id the error refers to.
    pub fn skill_id(&self) -> &str {
        match self {
            RegistryError::UnknownSkill(id) | RegistryError::DuplicateSkill(id) => id,
        }
    }
}
