//! Curriculum and demand-side entities.
//!
//! Courses own ordered learning objectives; industry standards and job
//! requirements are independent top-level records. All of them refer to the
//! skill vocabulary by id only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::skill::Skill;
use super::skill_set::{RequiredSkills, SkillSet};

/// A learning objective inside a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningObjective {
    pub id: String,
    pub description: String,
    /// Difficulty level carried over from keyword-based curricula.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<i64>,
    #[serde(default)]
    pub skills: SkillSet,
}

impl LearningObjective {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        skills: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            difficulty: None,
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: i64) -> Self {
        self.difficulty = Some(difficulty);
        self
    }
}

impl RequiredSkills for LearningObjective {
    fn effective_skill_set(&self) -> SkillSet {
        self.skills.clone()
    }
}

/// A course and its ordered objectives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub objectives: Vec<LearningObjective>,
}

impl Course {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        objectives: Vec<LearningObjective>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            objectives,
        }
    }
}

impl RequiredSkills for Course {
    /// Union of every objective's skills.
    fn effective_skill_set(&self) -> SkillSet {
        self.objectives
            .iter()
            .flat_map(|objective| objective.skills.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryStandard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: SkillSet,
}

impl IndustryStandard {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        skills: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl RequiredSkills for IndustryStandard {
    fn effective_skill_set(&self) -> SkillSet {
        self.skills.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub skills: SkillSet,
}

impl JobRequirement {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        skills: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }
}

impl RequiredSkills for JobRequirement {
    fn effective_skill_set(&self) -> SkillSet {
        self.skills.clone()
    }
}

/// The kinds of top-level records the store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Skill,
    Course,
    Standard,
    Job,
}

impl EntityKind {
    pub const ALL: [Self; 4] = [Self::Skill, Self::Course, Self::Standard, Self::Job];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Course => "course",
            Self::Standard => "standard",
            Self::Job => "job",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "skill" | "skills" => Ok(Self::Skill),
            "course" | "courses" => Ok(Self::Course),
            "standard" | "standards" | "industry_standard" => Ok(Self::Standard),
            "job" | "jobs" | "job_requirement" => Ok(Self::Job),
            other => Err(format!(
                "unknown entity kind {other} (expected skill|course|standard|job)"
            )),
        }
    }
}

/// A fully formed record handed to or returned from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Skill(Skill),
    Course(Course),
    Standard(IndustryStandard),
    Job(JobRequirement),
}

impl Entity {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Skill(_) => EntityKind::Skill,
            Self::Course(_) => EntityKind::Course,
            Self::Standard(_) => EntityKind::Standard,
            Self::Job(_) => EntityKind::Job,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Skill(skill) => &skill.id,
            Self::Course(course) => &course.id,
            Self::Standard(standard) => &standard.id,
            Self::Job(job) => &job.id,
        }
    }

    /// Display label: name for skills/courses/standards, title for jobs.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Skill(skill) => &skill.name,
            Self::Course(course) => &course.name,
            Self::Standard(standard) => &standard.name,
            Self::Job(job) => &job.title,
        }
    }
}

impl From<Skill> for Entity {
    fn from(value: Skill) -> Self {
        Self::Skill(value)
    }
}

impl From<Course> for Entity {
    fn from(value: Course) -> Self {
        Self::Course(value)
    }
}

impl From<IndustryStandard> for Entity {
    fn from(value: IndustryStandard) -> Self {
        Self::Standard(value)
    }
}

impl From<JobRequirement> for Entity {
    fn from(value: JobRequirement) -> Self {
        Self::Job(value)
    }
}
