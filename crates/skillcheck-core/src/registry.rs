//! Skill registry.
//!
//! Modules are wrapped at registration time so every registered skill
//! produces the same output shape, whatever the module itself returns.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::RngCore;

use crate::checker::AnswerPolicy;
use crate::error::RegistryError;
use crate::feedback::{is_graph_sentinel, FeedbackFormatter, Verdict};
use crate::skills;
use crate::traits::{Question, SkillModule};

/// Skill id → module, immutable once built.
#[derive(Clone, Default)]
pub struct SkillRegistry {
    skills: BTreeMap<String, Arc<dyn SkillModule>>,
}

impl std::fmt::Debug for SkillRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillRegistry")
            .field("skills", &self.skills.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in skill.
    pub fn with_builtin_skills() -> Self {
        let mut registry = Self::new();
        for skill in skills::builtin() {
            // Built-in ids are distinct.
            if let Err(e) = registry.register(skill) {
                tracing::warn!(error = %e, "skipping built-in skill");
            }
        }
        registry
    }

    /// Register a module under its own id.
    pub fn register(&mut self, skill: Arc<dyn SkillModule>) -> Result<(), RegistryError> {
        let id = skill.id().to_string();
        if self.skills.contains_key(&id) {
            return Err(RegistryError::DuplicateSkill(id));
        }
        tracing::debug!(skill = %id, "registered skill");
        self.skills
            .insert(id, Arc::new(RegisteredSkill { inner: skill }));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Arc<dyn SkillModule>, RegistryError> {
        self.skills
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownSkill(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SkillModule>> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Registration-time adapter around a skill module.
struct RegisteredSkill {
    inner: Arc<dyn SkillModule>,
}

impl SkillModule for RegisteredSkill {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn title(&self) -> &str {
        self.inner.title()
    }

    fn generate(&self, level: u32, rng: &mut dyn RngCore) -> Question {
        let mut question = self.inner.generate(level.max(1), rng);
        question.correct_answer = question.correct_answer.trim().to_string();
        if question.answer.is_none() {
            question.answer = Some(question.correct_answer.clone());
        }
        question
    }

    fn policy(&self) -> AnswerPolicy {
        self.inner.policy()
    }

    fn check(&self, user_answer: &str, correct_answer: &str) -> Verdict {
        if is_graph_sentinel(correct_answer) {
            return FeedbackFormatter.graph_instruction();
        }
        let verdict = self.inner.check(user_answer, correct_answer);
        Verdict {
            next_question: true,
            ..verdict
        }
    }
}
