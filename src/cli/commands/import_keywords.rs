//! currmap import-keywords - Fold legacy keyword tables into skill ids

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ImportKeywordsArgs {}

pub fn run(ctx: &AppContext, _args: &ImportKeywordsArgs) -> Result<()> {
    let report = ctx.db.import_keyword_tables()?;

    if ctx.robot_mode {
        return super::emit_data(ctx, report);
    }

    let mut layout = HumanLayout::new();
    layout
        .push_line(format!("{} Imported keyword tables", "✓".green().bold()))
        .kv("associations", &report.imported.to_string())
        .kv("new skills", &report.skills_created.to_string());
    if report.skipped > 0 {
        layout.kv("skipped", &format!("{} (owner missing)", report.skipped));
    }
    emit_human(layout);
    Ok(())
}
