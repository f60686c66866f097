//! Command-line interface for activity-slog.
//!
//! This module provides the CLI structure for the `slog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ButtonsCommand, ConfigCommand, DeleteButtonCommand, DeleteEntryCommand,
    ListCommand, LogCommand, OutputFormat, StatusCommand,
};

/// slog - Tap-to-log personal activity tracker
///
/// Keeps a grid of activity buttons and a timestamped log of every tap.
#[derive(Debug, Parser)]
#[command(name = "slog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the button grid
    Buttons(ButtonsCommand),

    /// Tap a button and log the activity
    Log(LogCommand),

    /// Show the activity log, newest first
    List(ListCommand),

    /// Add a button to the grid
    Add(AddCommand),

    /// Delete an entry from the log
    DeleteEntry(DeleteEntryCommand),

    /// Remove a button from the grid
    DeleteButton(DeleteButtonCommand),

    /// Start an interactive session
    Session,

    /// Show storage statistics
    Status(StatusCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
