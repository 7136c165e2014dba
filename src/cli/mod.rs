//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// currmap - align curricula with industry standards and job demand
#[derive(Parser, Debug)]
#[command(name = "currmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable JSON output for machine consumption
    #[arg(long, short = 'm', alias = "machine", global = true)]
    pub robot: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: <root>/config.toml and ~/.config/currmap/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory holding the store and project config
    #[arg(long, global = true, env = "CURRMAP_ROOT")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        OutputFormat::from_args(self.robot)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the store and a default config
    Init(commands::init::InitArgs),

    /// Load skills, standards, jobs and courses from a batch file
    Ingest(commands::ingest::IngestArgs),

    /// Load the bundled sample curriculum
    Seed(commands::seed::SeedArgs),

    /// List every entity of one kind
    List(commands::list::ListArgs),

    /// Show one entity
    Show(commands::show::ShowArgs),

    /// Coverage of every course against standards and jobs, plus suggestions
    Analyze(commands::analyze::AnalyzeArgs),

    /// Which standards and jobs each course touches at all
    Map(commands::map::MapArgs),

    /// Skills required by standards or jobs that no course covers
    Gaps(commands::gaps::GapsArgs),

    /// Suggested curriculum additions
    Suggest(commands::suggest::SuggestArgs),

    /// Most demanded skills across job postings
    Trends(commands::trends::TrendsArgs),

    /// Fold legacy keyword tables into skill ids
    ImportKeywords(commands::import_keywords::ImportKeywordsArgs),

    /// Store location, entity counts and dropped references
    Status(commands::status::StatusArgs),
}
