//! currmap seed - Load the bundled sample curriculum

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::emit_human;
use crate::error::Result;
use crate::ingest::sample_batch;

#[derive(Args, Debug)]
pub struct SeedArgs {}

pub fn run(ctx: &AppContext, _args: &SeedArgs) -> Result<()> {
    let summary = sample_batch()?.apply(&ctx.db)?;

    if ctx.robot_mode {
        return super::emit_data(ctx, summary);
    }
    emit_human(super::ingest::summary_layout("Loaded sample curriculum", &summary));
    Ok(())
}
