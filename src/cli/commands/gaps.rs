//! currmap gaps - Required skills no course covers

use clap::Args;
use colored::Colorize;

use crate::alignment::{Snapshot, identify_gaps};
use crate::app::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct GapsArgs {}

pub fn run(ctx: &AppContext, _args: &GapsArgs) -> Result<()> {
    let snapshot = Snapshot::load(&ctx.db)?;
    let gaps = identify_gaps(&snapshot);

    if ctx.robot_mode {
        return super::emit_data(ctx, gaps);
    }

    if gaps.is_empty() {
        println!("{}", "No curriculum gaps found.".green());
        return Ok(());
    }
    for gap in &gaps {
        println!("{gap}");
    }
    Ok(())
}
