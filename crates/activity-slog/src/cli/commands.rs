//! CLI command definitions.
//!
//! This module defines the structure of the subcommands that take arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Buttons command arguments.
#[derive(Debug, Args)]
pub struct ButtonsCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Log command arguments.
#[derive(Debug, Args)]
pub struct LogCommand {
    /// Label of the button to tap
    pub label: String,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Maximum number of entries to show (overrides `display.log_limit`)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Label of the new button (prompted for when omitted)
    pub label: Option<String>,
}

/// Delete-entry command arguments.
#[derive(Debug, Args)]
pub struct DeleteEntryCommand {
    /// Position of the entry in `slog list` (1 is the newest)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub position: u64,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Delete-button command arguments.
#[derive(Debug, Args)]
pub struct DeleteButtonCommand {
    /// Label of the button to remove
    pub label: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}
