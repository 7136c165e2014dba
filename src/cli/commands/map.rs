//! currmap map - Courses to the standards and jobs they share any skill with

use clap::Args;
use colored::Colorize;

use crate::alignment::{CourseMatches, Snapshot, relational_map};
use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct MapArgs {}

pub fn run(ctx: &AppContext, _args: &MapArgs) -> Result<()> {
    let snapshot = Snapshot::load(&ctx.db)?;
    let matches = relational_map(&snapshot);

    if ctx.robot_mode {
        return super::emit_data(ctx, matches);
    }

    print_section("Course to Industry Standard Mapping:", &matches, |m| &m.standards);
    println!();
    print_section("Course to Job Requirement Mapping:", &matches, |m| &m.jobs);
    Ok(())
}

fn print_section(
    heading: &str,
    matches: &[CourseMatches],
    targets: impl Fn(&CourseMatches) -> &Vec<String>,
) {
    println!("{}", heading.bold());
    if matches.is_empty() {
        println!("  {}", "(no courses)".dimmed());
    }
    for course in matches {
        let ids = targets(course);
        let listed = if ids.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            ids.join(", ")
        };
        println!("- {}: {listed}", course.course_id);
    }
}
