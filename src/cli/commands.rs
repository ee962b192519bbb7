//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - retry / forever: run one command until it succeeds
//! - each / map / filter: run a command template once per item, in order
//! - repeat: run a command a fixed number of times

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Seqflow - run shell commands through sequential async combinators
#[derive(Parser, Debug)]
#[command(name = "seqflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a command, retrying a bounded number of times on failure
    Retry {
        /// Retries after the first attempt (defaults to config)
        #[arg(short, long, allow_negative_numbers = true)]
        times: Option<i64>,

        /// Milliseconds to wait between attempts (defaults to config)
        #[arg(short, long, allow_negative_numbers = true)]
        interval: Option<i64>,

        /// Command to run
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },

    /// Run a command until it succeeds, with no attempt limit
    Forever {
        /// Milliseconds to wait after each failure (defaults to config)
        #[arg(short, long, allow_negative_numbers = true)]
        interval: Option<i64>,

        /// Command to run
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },

    /// Run a command template for each item in order, stopping at the first failure
    Each {
        /// Item substituted for `{}` in the command (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,

        /// Command template
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },

    /// Like `each`, but print every command's output once all have succeeded
    Map {
        /// Item substituted for `{}` in the command (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,

        /// Command template
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },

    /// Print the items whose command template exits successfully
    Filter {
        /// Item substituted for `{}` in the command (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<String>,

        /// Command template
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },

    /// Run a command a fixed number of times, one after another
    Repeat {
        /// Number of iterations
        #[arg(short = 'n', long)]
        count: u64,

        /// Command to run
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },
}
