//! Core domain types: the skill vocabulary, curriculum and demand entities,
//! and the skill-set arithmetic alignment is built on.

pub mod entities;
pub mod skill;
pub mod skill_set;

pub use entities::{Course, Entity, EntityKind, IndustryStandard, JobRequirement, LearningObjective};
pub use skill::{Skill, SkillVocabulary, normalize_keyword};
pub use skill_set::{RequiredSkills, SkillSet, coverage_percentage, round2};
