//! Point-in-time view of the store that every analysis runs against.

use tracing::debug;

use crate::core::{
    Course, IndustryStandard, JobRequirement, RequiredSkills, Skill, SkillSet, SkillVocabulary,
};
use crate::error::Result;
use crate::storage::Database;

/// All entities of one analysis run, in store enumeration order.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub skills: SkillVocabulary,
    pub courses: Vec<Course>,
    pub standards: Vec<IndustryStandard>,
    pub jobs: Vec<JobRequirement>,
}

impl Snapshot {
    pub fn new(
        skills: impl IntoIterator<Item = Skill>,
        courses: Vec<Course>,
        standards: Vec<IndustryStandard>,
        jobs: Vec<JobRequirement>,
    ) -> Self {
        Self {
            skills: SkillVocabulary::new(skills),
            courses,
            standards,
            jobs,
        }
    }

    /// Read the full current contents of the store.
    pub fn load(db: &Database) -> Result<Self> {
        let snapshot = Self::new(
            db.list_skills()?,
            db.list_courses()?,
            db.list_standards()?,
            db.list_jobs()?,
        );
        debug!(
            skills = snapshot.skills.len(),
            courses = snapshot.courses.len(),
            standards = snapshot.standards.len(),
            jobs = snapshot.jobs.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Union of every course's effective skill set.
    pub fn curriculum_skills(&self) -> SkillSet {
        self.courses
            .iter()
            .flat_map(RequiredSkills::effective_skill_set)
            .collect()
    }

    /// Union of the skills any standard or job asks for.
    pub fn demanded_skills(&self) -> SkillSet {
        self.standards
            .iter()
            .map(RequiredSkills::effective_skill_set)
            .chain(self.jobs.iter().map(RequiredSkills::effective_skill_set))
            .flatten()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.standards.is_empty() && self.jobs.is_empty()
    }
}
