//! Curriculum gaps and improvement suggestions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::skill_set::{join_skills, missing};
use crate::core::{RequiredSkills, SkillSet};

use super::Snapshot;

/// The standard or job a gap line is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GapTarget {
    Standard { id: String, name: String },
    Job { id: String, title: String },
}

impl GapTarget {
    pub fn id(&self) -> &str {
        match self {
            Self::Standard { id, .. } | Self::Job { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Standard { name, .. } => name,
            Self::Job { title, .. } => title,
        }
    }
}

/// Skills a standard or job requires that no course teaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gap {
    pub target: GapTarget,
    pub missing: SkillSet,
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            GapTarget::Standard { name, .. } => write!(
                f,
                "Missing skills for standard {name}: {}",
                join_skills(&self.missing)
            ),
            GapTarget::Job { title, .. } => write!(
                f,
                "Missing skills for job {title}: {}",
                join_skills(&self.missing)
            ),
        }
    }
}

/// Standards first, then jobs, each in store order; fully covered targets
/// produce nothing.
pub fn identify_gaps(snapshot: &Snapshot) -> Vec<Gap> {
    let curriculum = snapshot.curriculum_skills();
    gaps_against(snapshot, &curriculum)
}

fn gaps_against(snapshot: &Snapshot, covered: &SkillSet) -> Vec<Gap> {
    let standards = snapshot.standards.iter().map(|standard| {
        (
            GapTarget::Standard {
                id: standard.id.clone(),
                name: standard.name.clone(),
            },
            standard.effective_skill_set(),
        )
    });
    let jobs = snapshot.jobs.iter().map(|job| {
        (
            GapTarget::Job {
                id: job.id.clone(),
                title: job.title.clone(),
            },
            job.effective_skill_set(),
        )
    });

    standards
        .chain(jobs)
        .filter_map(|(target, required)| {
            let missing = missing(&required, covered);
            (!missing.is_empty()).then_some(Gap { target, missing })
        })
        .collect()
}

/// Which suggestion variant to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionMode {
    /// One line per skill missing from the whole curriculum.
    #[default]
    Global,
    /// One line per course and uncovered standard/job.
    PerCourse,
}

impl FromStr for SuggestionMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "per-course" | "per_course" | "percourse" | "course" => Ok(Self::PerCourse),
            other => Err(format!(
                "invalid suggestion mode {other} (expected global|per-course)"
            )),
        }
    }
}

impl fmt::Display for SuggestionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Global => "global",
            Self::PerCourse => "per-course",
        })
    }
}

/// A skill worth adding to the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub skill_id: String,
    pub name: String,
    pub description: String,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "- {}", self.name)
        } else {
            write!(f, "- {}: {}", self.name, self.description)
        }
    }
}

/// Header printed above a non-empty list of [`Suggestion`]s.
pub const GLOBAL_SUGGESTION_HEADER: &str =
    "Consider adding the following skills to your curriculum:";

/// Skills demanded by any standard or job that no course covers.
///
/// Ids without a vocabulary entry are skipped.
pub fn global_suggestions(snapshot: &Snapshot) -> Vec<Suggestion> {
    let missing = missing(&snapshot.demanded_skills(), &snapshot.curriculum_skills());
    missing
        .iter()
        .filter_map(|skill_id| snapshot.skills.get(skill_id))
        .map(|skill| Suggestion {
            skill_id: skill.id.clone(),
            name: skill.name.clone(),
            description: skill.description.clone(),
        })
        .collect()
}

/// Skills one course could add to cover a given standard or job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSuggestion {
    pub course_id: String,
    pub course_name: String,
    pub target: GapTarget,
    pub missing: SkillSet,
}

impl fmt::Display for CourseSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relation = match self.target {
            GapTarget::Standard { .. } => "from",
            GapTarget::Job { .. } => "for",
        };
        write!(
            f,
            "Course {} ({}) could cover these skills {relation} {}: {}",
            self.course_id,
            self.course_name,
            self.target.label(),
            join_skills(&self.missing)
        )
    }
}

/// Per-course variant: each course against every standard and job.
pub fn course_suggestions(snapshot: &Snapshot) -> Vec<CourseSuggestion> {
    snapshot
        .courses
        .iter()
        .flat_map(|course| {
            let covered = course.effective_skill_set();
            gaps_against(snapshot, &covered)
                .into_iter()
                .map(move |gap| CourseSuggestion {
                    course_id: course.id.clone(),
                    course_name: course.name.clone(),
                    target: gap.target,
                    missing: gap.missing,
                })
        })
        .collect()
}

/// Output of either suggestion variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "items", rename_all = "kebab-case")]
pub enum Suggestions {
    Global(Vec<Suggestion>),
    PerCourse(Vec<CourseSuggestion>),
}

impl Suggestions {
    pub fn build(snapshot: &Snapshot, mode: SuggestionMode) -> Self {
        match mode {
            SuggestionMode::Global => Self::Global(global_suggestions(snapshot)),
            SuggestionMode::PerCourse => Self::PerCourse(course_suggestions(snapshot)),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Global(items) => items.is_empty(),
            Self::PerCourse(items) => items.is_empty(),
        }
    }

    /// Rendered lines; the global variant starts with its header.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Global(items) if items.is_empty() => Vec::new(),
            Self::Global(items) => std::iter::once(GLOBAL_SUGGESTION_HEADER.to_string())
                .chain(items.iter().map(ToString::to_string))
                .collect(),
            Self::PerCourse(items) => items.iter().map(ToString::to_string).collect(),
        }
    }
}
