//! CLI module for seqflow - command-line interface and subcommands.
//!
//! Each subcommand drives one of the library combinators with a shell
//! command as the operation.

pub mod commands;
pub mod exec;

pub use commands::Cli;
