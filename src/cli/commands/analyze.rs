//! currmap analyze - Per-course coverage report with suggestions

use clap::Args;

use crate::alignment::{AlignmentReport, Snapshot, SuggestionMode};
use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Suggestion variant: global or per-course (default from config)
    #[arg(long, value_name = "MODE")]
    pub suggestions: Option<SuggestionMode>,
}

pub fn run(ctx: &AppContext, args: &AnalyzeArgs) -> Result<()> {
    let mode = args
        .suggestions
        .unwrap_or(ctx.config.analysis.suggestion_mode);
    let snapshot = Snapshot::load(&ctx.db)?;
    let report = AlignmentReport::build(&snapshot, mode);

    if ctx.robot_mode {
        return super::emit_data(ctx, report);
    }

    print!("{}", report.render_text());
    Ok(())
}
