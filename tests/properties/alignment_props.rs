use std::collections::BTreeSet;

use proptest::prelude::*;

use currmap::alignment::{Snapshot, identify_gaps, map_course_to_standards};
use currmap::core::{
    Course, IndustryStandard, LearningObjective, Skill, SkillSet, coverage_percentage, round2,
};

fn no_skills() -> Vec<Skill> {
    Vec::new()
}

fn arb_skill_set() -> impl Strategy<Value = SkillSet> {
    prop::collection::btree_set("S[0-9]{1,2}", 0..12)
}

fn arb_course(id: usize) -> impl Strategy<Value = Course> {
    prop::collection::vec(arb_skill_set(), 0..4).prop_map(move |objectives| {
        Course::new(
            format!("C{id}"),
            format!("Course {id}"),
            objectives
                .into_iter()
                .enumerate()
                .map(|(idx, skills)| LearningObjective::new(format!("C{id}-{idx}"), "objective", skills))
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn coverage_matches_definition(required in arb_skill_set(), covered in arb_skill_set()) {
        let pct = coverage_percentage(&required, &covered);
        if required.is_empty() {
            prop_assert!(pct.abs() < f64::EPSILON);
        } else {
            let matched = required.intersection(&covered).count();
            #[allow(clippy::cast_precision_loss)]
            let expected = matched as f64 / required.len() as f64 * 100.0;
            prop_assert!((pct - expected).abs() < 1e-9);
        }
        prop_assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn full_coverage_iff_subset(required in arb_skill_set(), covered in arb_skill_set()) {
        prop_assume!(!required.is_empty());
        let pct = coverage_percentage(&required, &covered);
        prop_assert_eq!((pct - 100.0).abs() < 1e-9, required.is_subset(&covered));
        prop_assert_eq!(pct.abs() < 1e-9, required.is_disjoint(&covered));
    }

    #[test]
    fn rounding_stays_within_half_a_hundredth(value in 0.0f64..=100.0) {
        prop_assert!((round2(value) - value).abs() <= 0.005 + 1e-9);
    }

    #[test]
    fn gaps_equal_required_minus_curriculum(
        c0 in arb_course(0),
        c1 in arb_course(1),
        standards in prop::collection::vec(arb_skill_set(), 0..4),
    ) {
        let standards: Vec<_> = standards
            .into_iter()
            .enumerate()
            .map(|(idx, skills)| IndustryStandard::new(format!("STD{idx}"), format!("Standard {idx}"), skills))
            .collect();
        let snapshot = Snapshot::new(no_skills(), vec![c0, c1], standards.clone(), vec![]);
        let curriculum = snapshot.curriculum_skills();
        let gaps = identify_gaps(&snapshot);

        let expected: Vec<(String, SkillSet)> = standards
            .iter()
            .map(|s| (s.id.clone(), s.skills.difference(&curriculum).cloned().collect::<SkillSet>()))
            .filter(|(_, missing)| !missing.is_empty())
            .collect();
        let actual: Vec<(String, SkillSet)> = gaps
            .iter()
            .map(|gap| (gap.target.id().to_string(), gap.missing.clone()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn covering_a_missing_skill_removes_only_that_skill(
        course in arb_course(0),
        required in arb_skill_set(),
    ) {
        let standard = IndustryStandard::new("STD", "Standard", required);
        let before = Snapshot::new(no_skills(), vec![course.clone()], vec![standard.clone()], vec![]);
        let gaps = identify_gaps(&before);
        prop_assume!(!gaps.is_empty());
        let skill = gaps[0].missing.iter().next().cloned().unwrap();

        let patch = Course::new("PATCH", "Patch", vec![LearningObjective::new("PATCH-1", "x", [skill.clone()])]);
        let after = Snapshot::new(no_skills(), vec![course, patch], vec![standard], vec![]);
        let after_missing: BTreeSet<String> = identify_gaps(&after)
            .into_iter()
            .flat_map(|gap| gap.missing)
            .collect();

        let mut expected = gaps[0].missing.clone();
        expected.remove(&skill);
        prop_assert_eq!(after_missing, expected);
    }

    #[test]
    fn course_coverage_keeps_standard_order(
        course in arb_course(0),
        standards in prop::collection::vec(arb_skill_set(), 0..6),
    ) {
        let standards: Vec<_> = standards
            .into_iter()
            .enumerate()
            .map(|(idx, skills)| IndustryStandard::new(format!("STD{idx}"), format!("Standard {idx}"), skills))
            .collect();
        let snapshot = Snapshot::new(no_skills(), vec![course], standards.clone(), vec![]);
        let entries = map_course_to_standards(&snapshot, &snapshot.courses[0]);
        let ids: Vec<_> = entries.iter().map(|e| e.target_id.clone()).collect();
        let expected: Vec<_> = standards.iter().map(|s| s.id.clone()).collect();
        prop_assert_eq!(ids, expected);
    }
}
