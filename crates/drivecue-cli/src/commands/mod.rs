//! Command implementations for drivecuectl

pub mod bookmarks;
pub mod config;
pub mod run;
pub mod seek;
pub mod snapshot;

use clap::{Args, Subcommand};

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Stop after this many polls instead of running until Ctrl-C
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Scenario offset in seconds to seek to before polling
    #[arg(long, conflicts_with = "bookmark")]
    pub from: Option<i64>,

    /// Bookmark index to seek to before polling
    #[arg(long)]
    pub bookmark: Option<usize>,

    /// Only print state transitions and trip events
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct SeekArgs {
    /// Scenario offset in seconds
    pub seconds: Option<i64>,

    /// Bookmark index (see `drivecuectl bookmarks`)
    #[arg(short, long)]
    pub bookmark: Option<usize>,

    /// Skip forward by the configured step, counting from FROM seconds when
    /// given and from the scenario time of a first poll otherwise
    #[arg(long, value_name = "FROM", num_args = 0..=1)]
    pub skip: Option<Option<i64>>,

    /// Rewind to the start of the scenario
    #[arg(long)]
    pub reset: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Validate the effective configuration
    Check,
}
