//! One analysis run bundled for output.

use serde::Serialize;

use super::coverage::{CourseCoverage, CourseMatches, coverage_report, relational_map};
use super::gaps::{Gap, SuggestionMode, Suggestions, identify_gaps};
use super::Snapshot;

/// Printed when the suggestion block is empty.
pub const NO_SUGGESTIONS: &str = "No improvements suggested. The curriculum aligns well with industry standards and job requirements.";

/// Everything the alignment engine derives from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport {
    pub coverage: Vec<CourseCoverage>,
    pub relational: Vec<CourseMatches>,
    pub gaps: Vec<Gap>,
    pub suggestions: Suggestions,
}

impl AlignmentReport {
    pub fn build(snapshot: &Snapshot, mode: SuggestionMode) -> Self {
        Self {
            coverage: coverage_report(snapshot),
            relational: relational_map(snapshot),
            gaps: identify_gaps(snapshot),
            suggestions: Suggestions::build(snapshot, mode),
        }
    }

    /// Plain-text console summary: per-course coverage, then suggestions.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for course in &self.coverage {
            out.push_str(&format!("\nAnalyzing course: {}\n", course.course_name));
            out.push_str("Industry Standards Alignment:\n");
            for entry in &course.standards {
                out.push_str(&format!(
                    "- {}: {}%\n",
                    entry.target_name,
                    format_percent(entry.percentage)
                ));
            }
            out.push_str("Job Requirements Alignment:\n");
            for entry in &course.jobs {
                out.push_str(&format!(
                    "- {}: {}%\n",
                    entry.target_name,
                    format_percent(entry.percentage)
                ));
            }
        }

        if self.suggestions.is_empty() {
            out.push_str(&format!("\n{NO_SUGGESTIONS}\n"));
        } else {
            out.push_str("\nSuggested Improvements:\n");
            for line in self.suggestions.lines() {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }
}

/// Whole numbers keep one decimal (`100.0`); others print as rounded.
pub fn format_percent(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
