//! `license-sweep`: run `go-licenses` over every module in a directory tree.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and set up logging.
//! 2. Load config ([`config::load_config`]) and apply CLI overrides.
//! 3. Find module roots ([`locator`]).
//! 4. Run the scanner ([`scanner`]) for each root in a bounded
//!    [`orchestrator::TaskGroup`].
//! 5. `check`: print a summary ([`report::terminal`]) and fail on the first
//!    module with violations. `report`: write each module's Markdown report
//!    ([`report::markdown`]).
//! 6. Exit `0`, or `1` with a single error line.

mod cli;
mod commands;
mod config;
mod error;
mod locator;
mod models;
mod orchestrator;
mod report;
mod scanner;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::{Cli, Command};
use commands::Sweep;
use config::load_config;

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.command.root(), cli.config.as_deref())?;
    if let Some(scanner) = cli.scanner {
        config.scanner = scanner;
    }
    if let Some(jobs) = cli.jobs {
        config.jobs = usize::from(jobs);
    }

    let sweep = Sweep::new(config, cli.quiet);
    match &cli.command {
        Command::Check {
            root,
            disallowed_types,
            json,
        } => sweep.check(root, disallowed_types, *json).await,
        Command::Report { root } => sweep.report(root).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
