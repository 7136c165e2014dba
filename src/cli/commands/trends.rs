//! currmap trends - Most demanded skills across job postings

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::error::Result;
use crate::market::{JobMarketSource, SkillTrend, summarize_trends};

#[derive(Args, Debug)]
pub struct TrendsArgs {
    /// Search keyword passed to the market source (default from config)
    #[arg(long)]
    pub keyword: Option<String>,

    /// Search location passed to the market source (default from config)
    #[arg(long)]
    pub location: Option<String>,

    /// Number of skills to report (default from config)
    #[arg(long, short = 'n')]
    pub top: Option<usize>,
}

#[derive(Serialize)]
struct TrendsOutput<'a> {
    keyword: &'a str,
    location: &'a str,
    postings: usize,
    trends: Vec<SkillTrend>,
}

pub fn run(ctx: &AppContext, args: &TrendsArgs) -> Result<()> {
    let market = &ctx.config.market;
    let keyword = args.keyword.as_deref().unwrap_or(&market.default_keyword);
    let location = args.location.as_deref().unwrap_or(&market.default_location);
    let top_n = args.top.unwrap_or(market.trends_top_n);

    let postings = ctx.job_market()?.fetch_postings(keyword, location)?;
    let trends = summarize_trends(&postings, top_n);

    if ctx.robot_mode {
        return super::emit_data(
            ctx,
            TrendsOutput {
                keyword,
                location,
                postings: postings.len(),
                trends,
            },
        );
    }

    println!(
        "{}",
        format!("Job Market Trends (Top {top_n} skills):").bold()
    );
    for trend in &trends {
        println!("- {}: {}", trend.skill, trend.count);
    }
    println!();
    println!(
        "{} {} postings for \"{keyword}\" in {location}",
        "Source:".dimmed(),
        postings.len()
    );
    Ok(())
}
