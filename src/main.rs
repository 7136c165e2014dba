//! currmap - curriculum alignment and gap analysis
//!
//! Maps courses against industry standards and job requirements.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use currmap::Result;
use currmap::app::AppContext;
use currmap::cli::Cli;
use currmap::cli::output::{emit_robot, robot_error};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Config may turn robot mode on, so the flag is only final once the
    // context is built.
    let mut robot = cli.robot;
    match run(&cli, &mut robot) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if robot {
                // Robot mode: structured JSON error on stdout
                if emit_robot(&robot_error(&e), true).is_err() {
                    println!("{{\"status\":\"error\",\"message\":{:?}}}", e.to_string());
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, robot: &mut bool) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    *robot = ctx.robot_mode;
    currmap::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,currmap=info",
        1 => "info,currmap=debug",
        2 => "debug,currmap=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        // JSON logging for robot mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
