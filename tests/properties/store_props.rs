use proptest::prelude::*;

use currmap::core::{Course, LearningObjective, Skill};
use currmap::storage::Database;

fn arb_objectives(prefix: &'static str) -> impl Strategy<Value = Vec<LearningObjective>> {
    prop::collection::vec(
        (
            ".{0,24}",
            prop::option::of(1i64..5),
            prop::collection::btree_set("S[0-4]", 0..4),
        ),
        0..5,
    )
    .prop_map(move |items| {
        items
            .into_iter()
            .enumerate()
            .map(|(idx, (description, difficulty, skills))| {
                let mut objective = LearningObjective::new(format!("{prefix}-{idx}"), description, skills);
                objective.difficulty = difficulty;
                objective
            })
            .collect()
    })
}

fn vocabulary(db: &Database) {
    for idx in 0..5 {
        db.put_skill(&Skill::new(format!("S{idx}"), format!("skill {idx}")))
            .unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn writing_a_course_twice_equals_writing_it_once(objectives in arb_objectives("A")) {
        let db = Database::open_in_memory().unwrap();
        vocabulary(&db);
        let course = Course::new("C1", "Course", objectives);

        db.put_course(&course).unwrap();
        let once = db.get_course("C1").unwrap();
        db.put_course(&course).unwrap();
        let twice = db.get_course("C1").unwrap();

        prop_assert_eq!(once.as_ref(), Some(&course));
        prop_assert_eq!(once, twice);
        prop_assert_eq!(db.counts().unwrap().objectives, course.objectives.len() as u64);
    }

    #[test]
    fn rewriting_a_course_replaces_its_objectives(
        first in arb_objectives("A"),
        second in arb_objectives("B"),
    ) {
        let db = Database::open_in_memory().unwrap();
        vocabulary(&db);
        db.put_course(&Course::new("C1", "Course", first)).unwrap();
        let replacement = Course::new("C1", "Renamed", second);
        db.put_course(&replacement).unwrap();

        prop_assert_eq!(db.get_course("C1").unwrap(), Some(replacement.clone()));
        prop_assert_eq!(db.counts().unwrap().objectives, replacement.objectives.len() as u64);
    }
}
