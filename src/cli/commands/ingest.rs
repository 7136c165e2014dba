//! currmap ingest - Load a batch file into the store

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human};
use crate::error::Result;
use crate::ingest::{IngestBatch, IngestSummary};

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Batch file (.json, .yaml, .yml or .toml)
    pub file: PathBuf,
}

pub fn run(ctx: &AppContext, args: &IngestArgs) -> Result<()> {
    let batch = IngestBatch::load(&args.file)?;
    let summary = batch.apply(&ctx.db)?;

    if ctx.robot_mode {
        return super::emit_data(ctx, summary);
    }
    emit_human(summary_layout(&format!("Ingested {}", args.file.display()), &summary));
    Ok(())
}

/// Human summary shared with `seed`.
pub(crate) fn summary_layout(title: &str, summary: &IngestSummary) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout
        .push_line(format!("{} {title}", "✓".green().bold()))
        .kv("skills", &summary.skills.to_string());
    if summary.keyword_skills > 0 {
        layout.kv("from keywords", &summary.keyword_skills.to_string());
    }
    layout
        .kv("standards", &summary.standards.to_string())
        .kv("jobs", &summary.jobs.to_string())
        .kv(
            "courses",
            &format!("{} ({} objectives)", summary.courses, summary.objectives),
        );
    layout
}
