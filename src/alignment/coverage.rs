//! Coverage percentages and the boolean course-to-target mapping.

use serde::Serialize;

use crate::core::{Course, RequiredSkills, SkillSet, coverage_percentage, round2};
use crate::core::skill_set::intersects;

use super::Snapshot;

/// How much of one standard's or job's required skills a course covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageEntry {
    pub target_id: String,
    /// Standard name or job title.
    pub target_name: String,
    /// Rounded to two decimal places.
    pub percentage: f64,
    pub matched: usize,
    pub required: usize,
}

impl CoverageEntry {
    pub fn compute(
        target_id: impl Into<String>,
        target_name: impl Into<String>,
        required: &SkillSet,
        covered: &SkillSet,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            target_name: target_name.into(),
            percentage: round2(coverage_percentage(required, covered)),
            matched: required.intersection(covered).count(),
            required: required.len(),
        }
    }
}

/// Alignment of one course against every standard and job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseCoverage {
    pub course_id: String,
    pub course_name: String,
    pub standards: Vec<CoverageEntry>,
    pub jobs: Vec<CoverageEntry>,
}

/// Percentage of each standard's skills covered by `course`.
pub fn map_course_to_standards(snapshot: &Snapshot, course: &Course) -> Vec<CoverageEntry> {
    let covered = course.effective_skill_set();
    snapshot
        .standards
        .iter()
        .map(|standard| {
            CoverageEntry::compute(
                &standard.id,
                &standard.name,
                &standard.effective_skill_set(),
                &covered,
            )
        })
        .collect()
}

/// Percentage of each job's skills covered by `course`.
pub fn map_course_to_jobs(snapshot: &Snapshot, course: &Course) -> Vec<CoverageEntry> {
    let covered = course.effective_skill_set();
    snapshot
        .jobs
        .iter()
        .map(|job| CoverageEntry::compute(&job.id, &job.title, &job.effective_skill_set(), &covered))
        .collect()
}

pub fn course_coverage(snapshot: &Snapshot, course: &Course) -> CourseCoverage {
    CourseCoverage {
        course_id: course.id.clone(),
        course_name: course.name.clone(),
        standards: map_course_to_standards(snapshot, course),
        jobs: map_course_to_jobs(snapshot, course),
    }
}

/// Coverage for every course in the snapshot.
pub fn coverage_report(snapshot: &Snapshot) -> Vec<CourseCoverage> {
    snapshot
        .courses
        .iter()
        .map(|course| course_coverage(snapshot, course))
        .collect()
}

/// Ids of the standards and jobs a course shares any skill with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseMatches {
    pub course_id: String,
    pub standards: Vec<String>,
    pub jobs: Vec<String>,
}

/// Boolean variant of coverage: a target matches iff the sets intersect.
pub fn relational_map(snapshot: &Snapshot) -> Vec<CourseMatches> {
    snapshot
        .courses
        .iter()
        .map(|course| {
            let covered = course.effective_skill_set();
            CourseMatches {
                course_id: course.id.clone(),
                standards: snapshot
                    .standards
                    .iter()
                    .filter(|standard| intersects(&standard.skills, &covered))
                    .map(|standard| standard.id.clone())
                    .collect(),
                jobs: snapshot
                    .jobs
                    .iter()
                    .filter(|job| intersects(&job.skills, &covered))
                    .map(|job| job.id.clone())
                    .collect(),
            }
        })
        .collect()
}
