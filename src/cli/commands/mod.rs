//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use serde::Serialize;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;

pub mod analyze;
pub mod gaps;
pub mod import_keywords;
pub mod ingest;
pub mod init;
pub mod list;
pub mod map;
pub mod seed;
pub mod show;
pub mod status;
pub mod suggest;
pub mod trends;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Init(args) => init::run(ctx, args),
        Commands::Ingest(args) => ingest::run(ctx, args),
        Commands::Seed(args) => seed::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Analyze(args) => analyze::run(ctx, args),
        Commands::Map(args) => map::run(ctx, args),
        Commands::Gaps(args) => gaps::run(ctx, args),
        Commands::Suggest(args) => suggest::run(ctx, args),
        Commands::Trends(args) => trends::run(ctx, args),
        Commands::ImportKeywords(args) => import_keywords::run(ctx, args),
        Commands::Status(args) => status::run(ctx, args),
    }
}

/// Print `data` as a robot response, carrying dropped skill references as
/// warnings.
pub(crate) fn emit_data<T: Serialize>(ctx: &AppContext, data: T) -> Result<()> {
    let warnings = ctx
        .db
        .dropped_references()
        .iter()
        .map(ToString::to_string)
        .collect();
    emit_robot(&robot_ok(data).with_warnings(warnings), ctx.pretty_json())
}
