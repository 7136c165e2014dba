//! Alignment engine: coverage, relational mapping, gaps and suggestions.
//!
//! Every function here is pure over a [`Snapshot`] taken from the store.

pub mod coverage;
pub mod gaps;
pub mod report;
pub mod snapshot;

pub use coverage::{
    CourseCoverage, CourseMatches, CoverageEntry, course_coverage, coverage_report,
    map_course_to_jobs, map_course_to_standards, relational_map,
};
pub use gaps::{
    CourseSuggestion, Gap, GapTarget, Suggestion, SuggestionMode, Suggestions,
    course_suggestions, global_suggestions, identify_gaps,
};
pub use report::{AlignmentReport, format_percent};
pub use snapshot::Snapshot;
