//! CLI command definitions for taskpad
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Listing format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Markdown,
    Json,
}

/// Theme action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeAction {
    /// Print the current theme (default)
    #[default]
    Show,
    /// Switch between light and dark
    Toggle,
    /// Use the light theme
    Light,
    /// Use the dark theme
    Dark,
}

/// Local to-do list
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Keep everything in memory; nothing is persisted
    #[arg(long, global = true, conflicts_with = "database")]
    pub memory: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tasks, newest first (default if no subcommand given)
    List {
        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Add a task
    Add {
        /// Task title (1-100 characters)
        title: String,

        /// Optional description (up to 500 characters)
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Flip a task between pending and completed
    Toggle {
        /// Task id
        id: String,
    },

    /// Change fields of a task
    Edit {
        /// Task id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Set completion explicitly
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: String,
    },

    /// Delete every task
    Clear,

    /// Show or change the color theme
    Theme {
        #[arg(value_enum, default_value_t)]
        action: ThemeAction,
    },
}
