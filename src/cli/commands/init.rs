//! currmap init - Create the store and a default project config

use std::fs;
use std::path::Path;

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human};
use crate::error::Result;

const DEFAULT_CONFIG: &str = r#"# currmap project configuration

[store]
# db_path = "currmap.db"
strict_references = false

[analysis]
# global | per-course
suggestion_mode = "global"

[market]
# catalog_path = "postings.yaml"
trends_top_n = 10
default_keyword = "software developer"
default_location = "New York"

[robot]
# json | compact
format = "json"
"#;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config.toml with the defaults
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct InitReport {
    root: String,
    db_path: String,
    schema_version: u32,
    config_written: bool,
}

pub fn run(ctx: &AppContext, args: &InitArgs) -> Result<()> {
    let config_written = write_default_config(ctx.root(), args.force)?;
    let report = InitReport {
        root: ctx.root().display().to_string(),
        db_path: ctx.db_path().display().to_string(),
        schema_version: ctx.db.schema_version(),
        config_written,
    };

    if ctx.robot_mode {
        return super::emit_data(ctx, report);
    }

    let mut layout = HumanLayout::new();
    layout
        .push_line(format!("{} Initialized at {}", "✓".green().bold(), report.root))
        .kv("store", &report.db_path)
        .kv("schema", &report.schema_version.to_string());
    if report.config_written {
        layout.kv("config", "config.toml (defaults)");
    }
    layout
        .blank()
        .push_line("Load data with:")
        .push_line("  currmap seed              # bundled sample curriculum")
        .push_line("  currmap ingest batch.yaml # your own");
    emit_human(layout);
    Ok(())
}

/// Write `config.toml` unless one exists; `force` overwrites.
fn write_default_config(root: &Path, force: bool) -> Result<bool> {
    let path = root.join("config.toml");
    if path.exists() && !force {
        return Ok(false);
    }
    fs::create_dir_all(root)?;
    fs::write(&path, DEFAULT_CONFIG)?;
    Ok(true)
}
