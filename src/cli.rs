use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};

use crate::models::LicenseType;

#[derive(Parser, Debug)]
#[command(
    name = "license-sweep",
    about = "Run go-licenses check/report on every module under a directory",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file [default: <root>/.license-sweep/config.toml,
    /// fallback ~/.config/license-sweep/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// License scanner executable [default: go-licenses]
    #[arg(long, global = true, env = "LICENSE_SWEEP_SCANNER", value_name = "PROGRAM")]
    pub scanner: Option<String>,

    /// Number of modules scanned at the same time [default: 10]
    #[arg(
        short,
        long,
        global = true,
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub jobs: Option<u16>,

    /// More log output (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fail if any module depends on a package with a disallowed license
    Check {
        /// Directory to search for modules
        root: PathBuf,

        /// Disallowed license types (repeatable or comma separated) [default: forbidden,restricted]
        #[arg(long = "disallowed_types", value_name = "TYPE", value_delimiter = ',')]
        disallowed_types: Vec<LicenseType>,

        /// Print per-module results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a Markdown license report into every module
    Report {
        /// Directory to search for modules
        root: PathBuf,
    },
}

impl Command {
    pub fn root(&self) -> &Path {
        match self {
            Command::Check { root, .. } | Command::Report { root } => root,
        }
    }
}
