//! Batch loading of skills, standards, jobs and courses.
//!
//! A batch file lists entities the way a curriculum author writes them.
//! Objectives, standards and jobs name their skills either by id (`skills`)
//! or as free text (`keywords`); keywords are normalized into skill ids and
//! get a vocabulary entry when none exists yet.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{
    Course, IndustryStandard, JobRequirement, LearningObjective, Skill, SkillSet,
};
use crate::error::{CmError, Result};
use crate::storage::Database;

const SAMPLE_BATCH: &str = include_str!("../../data/sample_batch.yaml");

/// Skill references as written in a batch file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRefs {
    /// Skill ids used verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    /// Free-text keywords, normalized into skill ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl SkillRefs {
    fn resolve(&self, keyword_skills: &mut Vec<Skill>) -> SkillSet {
        let mut set: SkillSet = self
            .skills
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        for keyword in &self.keywords {
            let skill = Skill::from_keyword(keyword);
            if skill.id.is_empty() {
                continue;
            }
            set.insert(skill.id.clone());
            keyword_skills.push(skill);
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub refs: SkillRefs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub refs: SkillRefs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveRecord {
    pub id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<i64>,
    #[serde(flatten)]
    pub refs: SkillRefs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub objectives: Vec<ObjectiveRecord>,
}

/// Contents of one batch file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestBatch {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub standards: Vec<StandardRecord>,
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
}

/// What [`IngestBatch::apply`] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IngestSummary {
    pub skills: usize,
    /// Vocabulary entries created for keywords not already known.
    pub keyword_skills: usize,
    pub standards: usize,
    pub jobs: usize,
    pub courses: usize,
    pub objectives: usize,
}

/// A batch converted to domain entities and validated.
#[derive(Debug, Clone, Default)]
struct ResolvedBatch {
    skills: Vec<Skill>,
    keyword_skills: Vec<Skill>,
    standards: Vec<IndustryStandard>,
    jobs: Vec<JobRequirement>,
    courses: Vec<Course>,
}

impl IngestBatch {
    /// Load a batch, choosing the parser by file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let batch = match extension.as_deref() {
            Some("json") => serde_json::from_str(&raw)?,
            Some("yaml" | "yml") => serde_yaml::from_str(&raw)?,
            Some("toml") => toml::from_str(&raw)?,
            _ => {
                return Err(CmError::InvalidInput(format!(
                    "unsupported batch format: {} (expected .json, .yaml, .yml or .toml)",
                    path.display()
                )));
            }
        };
        debug!(path = %path.display(), "parsed batch file");
        Ok(batch)
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.standards.is_empty()
            && self.jobs.is_empty()
            && self.courses.is_empty()
    }

    /// Write the batch: skills first, then standards, jobs and courses.
    ///
    /// The whole batch is validated before the first write. Each entity is
    /// committed on its own, so a storage failure midway keeps what was
    /// already written.
    pub fn apply(&self, db: &Database) -> Result<IngestSummary> {
        let resolved = self.resolve()?;
        let mut summary = IngestSummary::default();

        for skill in &resolved.skills {
            db.put_skill(skill)?;
            summary.skills += 1;
        }

        let declared: BTreeSet<&str> = resolved.skills.iter().map(|s| s.id.as_str()).collect();
        let mut seen = BTreeSet::new();
        for skill in &resolved.keyword_skills {
            if declared.contains(skill.id.as_str()) || !seen.insert(skill.id.as_str()) {
                continue;
            }
            if db.get_skill(&skill.id)?.is_none() {
                db.put_skill(skill)?;
                summary.keyword_skills += 1;
            }
        }

        for standard in &resolved.standards {
            db.put_standard(standard)?;
            summary.standards += 1;
        }
        for job in &resolved.jobs {
            db.put_job(job)?;
            summary.jobs += 1;
        }
        for course in &resolved.courses {
            db.put_course(course)?;
            summary.courses += 1;
            summary.objectives += course.objectives.len();
        }

        info!(
            skills = summary.skills,
            keyword_skills = summary.keyword_skills,
            standards = summary.standards,
            jobs = summary.jobs,
            courses = summary.courses,
            objectives = summary.objectives,
            "ingested batch"
        );
        Ok(summary)
    }

    fn resolve(&self) -> Result<ResolvedBatch> {
        let mut resolved = ResolvedBatch::default();

        for skill in &self.skills {
            require_id("skill", &skill.id)?;
            if skill.name.trim().is_empty() {
                return Err(CmError::InvalidInput(format!("skill {} has no name", skill.id)));
            }
            resolved.skills.push(skill.clone());
        }

        for record in &self.standards {
            require_id("standard", &record.id)?;
            let skills = record.refs.resolve(&mut resolved.keyword_skills);
            resolved.standards.push(
                IndustryStandard::new(&record.id, &record.name, skills)
                    .with_description(&record.description),
            );
        }

        for record in &self.jobs {
            require_id("job", &record.id)?;
            let skills = record.refs.resolve(&mut resolved.keyword_skills);
            resolved.jobs.push(JobRequirement::new(&record.id, &record.title, skills));
        }

        for record in &self.courses {
            require_id("course", &record.id)?;
            let mut objective_ids = BTreeSet::new();
            let mut objectives = Vec::with_capacity(record.objectives.len());
            for objective in &record.objectives {
                require_id("objective", &objective.id)?;
                if !objective_ids.insert(objective.id.as_str()) {
                    return Err(CmError::InvalidInput(format!(
                        "course {} lists objective {} twice",
                        record.id, objective.id
                    )));
                }
                let skills = objective.refs.resolve(&mut resolved.keyword_skills);
                let mut built =
                    LearningObjective::new(&objective.id, &objective.description, skills);
                built.difficulty = objective.difficulty;
                objectives.push(built);
            }
            resolved
                .courses
                .push(Course::new(&record.id, &record.name, objectives));
        }

        Ok(resolved)
    }
}

fn require_id(kind: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(CmError::InvalidInput(format!("{kind} with empty id")));
    }
    Ok(())
}

/// The bundled sample curriculum: 10 skills, 5 standards, 7 jobs, 2 courses.
pub fn sample_batch() -> Result<IngestBatch> {
    Ok(serde_yaml::from_str(SAMPLE_BATCH)?)
}
