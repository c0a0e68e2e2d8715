use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "TAME developers",
    version,
    about = "TAME CLI - Term analysis for atomic spectroscopy: identify observed lines from candidate energy levels and prepare LOPT input.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match observed lines against the transitions predicted by the project's levels.
    Match(MatchArgs),
    /// Match lines and write the input files for the LOPT level optimization.
    Lopt(LoptArgs),
}

/// Arguments for the `match` subcommand.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Path to the project configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path for the exported linelist (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Export every line, not only the identified ones.
    #[arg(long)]
    pub complete: bool,

    /// Skip the impurity passes listed under `other-elements`.
    #[arg(long)]
    pub main_only: bool,
}

/// Arguments for the `lopt` subcommand.
#[derive(Args, Debug)]
pub struct LoptArgs {
    /// Path to the project configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Directory receiving the LOPT input files.
    #[arg(short = 'd', long, required = true, value_name = "DIR")]
    pub out_dir: PathBuf,
}
