use clap::Parser;
use std::path::PathBuf;

use crate::rpm::{DEFAULT_MAX_DATA_SIZE, DecodeOptions};

#[derive(Parser, Debug)]
#[command(name = "rpmpeek")]
#[command(version)]
#[command(about = "Show RPM package metadata without librpm", long_about = None)]
#[command(after_help = "Examples:\n  \
  rpmpeek hello-2.12-1.x86_64.rpm          summary of one package\n  \
  rpmpeek -l -R hello-2.12-1.x86_64.rpm    files and dependencies\n  \
  rpmpeek --json *.rpm | jq .name          metadata of many packages as JSON")]
pub struct Cli {
    /// RPM package files
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// List files
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// List requires, provides, conflicts and obsoletes
    #[arg(short = 'R', long = "deps")]
    pub deps: bool,

    /// Show the changelog
    #[arg(long)]
    pub changelog: bool,

    /// Print each package as one line of JSON
    #[arg(long, conflicts_with_all = ["list", "deps", "changelog", "dump_index"])]
    pub json: bool,

    /// Print the raw metadata index table
    #[arg(long)]
    pub dump_index: bool,

    /// Largest metadata section to accept, in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_DATA_SIZE)]
    pub max_header_size: usize,

    /// Verbose logging (-vv => trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short = 'q')]
    pub quiet: bool,
}

impl Cli {
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::default().max_data_size(self.max_header_size)
    }

    /// Default log filter when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }
}
