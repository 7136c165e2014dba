//! currmap status - Store location, counts and dropped references

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::alignment::Snapshot;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human};
use crate::error::Result;
use crate::storage::{DroppedReference, ReferencePolicy, StoreCounts};

#[derive(Args, Debug)]
pub struct StatusArgs {}

#[derive(Serialize)]
struct StatusReport {
    root: String,
    db_path: String,
    schema_version: u32,
    reference_policy: &'static str,
    counts: StoreCounts,
    dropped_references: Vec<DroppedReference>,
}

pub fn run(ctx: &AppContext, _args: &StatusArgs) -> Result<()> {
    // A full hydration pass surfaces dangling skill references.
    Snapshot::load(&ctx.db)?;

    let report = StatusReport {
        root: ctx.root().display().to_string(),
        db_path: ctx.db_path().display().to_string(),
        schema_version: ctx.db.schema_version(),
        reference_policy: match ctx.db.reference_policy() {
            ReferencePolicy::Lossy => "lossy",
            ReferencePolicy::Strict => "strict",
        },
        counts: ctx.db.counts()?,
        dropped_references: ctx.db.dropped_references(),
    };

    if ctx.robot_mode {
        return super::emit_data(ctx, report);
    }

    let mut layout = HumanLayout::new();
    layout
        .title("currmap status")
        .kv("root", &report.root)
        .kv("store", &report.db_path)
        .kv("schema", &report.schema_version.to_string())
        .kv("references", report.reference_policy)
        .blank()
        .section("Entities")
        .kv("skills", &report.counts.skills.to_string())
        .kv("courses", &report.counts.courses.to_string())
        .kv("objectives", &report.counts.objectives.to_string())
        .kv("standards", &report.counts.standards.to_string())
        .kv("jobs", &report.counts.jobs.to_string());

    if !report.dropped_references.is_empty() {
        layout.blank().section(&"Dropped references".yellow().to_string());
        for dropped in &report.dropped_references {
            layout.bullet(&dropped.to_string());
        }
    }
    emit_human(layout);
    Ok(())
}
