//! currmap suggest - Skills worth adding to the curriculum

use clap::Args;

use crate::alignment::report::NO_SUGGESTIONS;
use crate::alignment::{Snapshot, SuggestionMode, Suggestions};
use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// One line per course and uncovered standard or job
    #[arg(long)]
    pub per_course: bool,
}

pub fn run(ctx: &AppContext, args: &SuggestArgs) -> Result<()> {
    let mode = if args.per_course {
        SuggestionMode::PerCourse
    } else {
        ctx.config.analysis.suggestion_mode
    };
    let snapshot = Snapshot::load(&ctx.db)?;
    let suggestions = Suggestions::build(&snapshot, mode);

    if ctx.robot_mode {
        return super::emit_data(ctx, suggestions);
    }

    if suggestions.is_empty() {
        println!("{NO_SUGGESTIONS}");
        return Ok(());
    }
    for line in suggestions.lines() {
        println!("{line}");
    }
    Ok(())
}
