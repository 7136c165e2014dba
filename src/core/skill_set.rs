//! Required-skill-set abstraction and the set arithmetic behind alignment.
//!
//! Every entity that demands or supplies skills exposes them through
//! [`RequiredSkills`], so the alignment code never cares which physical schema
//! the data came from.

use std::collections::BTreeSet;

/// An ordered set of skill ids.
pub type SkillSet = BTreeSet<String>;

/// Capability shared by courses, objectives, standards and jobs.
pub trait RequiredSkills {
    fn effective_skill_set(&self) -> SkillSet;
}

/// Percentage of `required` present in `covered`, unrounded.
///
/// An empty `required` set yields 0.
#[allow(clippy::cast_precision_loss)]
pub fn coverage_percentage(required: &SkillSet, covered: &SkillSet) -> f64 {
    if required.is_empty() {
        return 0.0;
    }
    let matched = required.intersection(covered).count();
    matched as f64 / required.len() as f64 * 100.0
}

/// Round to two decimal places, halves to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Skills of `required` absent from `covered`.
pub fn missing(required: &SkillSet, covered: &SkillSet) -> SkillSet {
    required.difference(covered).cloned().collect()
}

/// Whether the two sets share at least one skill.
pub fn intersects(a: &SkillSet, b: &SkillSet) -> bool {
    a.intersection(b).next().is_some()
}

/// Comma-joined rendering used in gap and suggestion lines.
pub fn join_skills<'a>(skills: impl IntoIterator<Item = &'a String>) -> String {
    skills
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
