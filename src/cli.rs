// src/cli.rs

use crate::config::DB_ENV;
use crate::export::{ExportFormat, DEFAULT_OUTPUT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tlog",
    version,
    about = "tlog - A terminal-based log keeper",
    long_about = "tlog captures short log entries (a title, optional content and tags) from the terminal, stores them locally, and lets you list, search, edit, delete and export them."
)]
pub struct Cli {
    /// A log ID to open (view, then delete / edit / quit).
    /// Without an ID or a command, all logs are listed.
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    #[arg(long, global = true, env = DB_ENV, value_name = "PATH", help = "Path to the log database (default: ~/.config/tlog/tlog.db)")]
    pub db: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Creates a new log entry.
    /// With TEXT the log is saved straight away; otherwise an interactive form opens.
    New {
        /// Title of the log
        text: Option<String>,

        #[arg(short, long, requires = "text", help = "Body content (only with TEXT)")]
        content: Option<String>,

        #[arg(short, long, requires = "text", help = "Comma-separated tags (only with TEXT)")]
        tags: Option<String>,

        #[arg(short, long, conflicts_with = "text", help = "Ask for the title only")]
        quick: bool,
    },

    /// Lists log entries, oldest first.
    List {
        #[arg(short, long, help = "Show at most N entries")]
        limit: Option<usize>,

        #[arg(short, long, help = "Only show logs whose title contains TERM")]
        search: Option<String>,
    },

    /// Deletes a log by ID after confirmation.
    Delete {
        #[arg(help = "The ID of the log to delete")]
        id: String,
    },

    /// Edits a log by ID. Press Enter at a prompt to keep the current value.
    Edit {
        #[arg(help = "The ID of the log to edit")]
        id: String,
    },

    /// Exports all logs to a file.
    Export {
        #[arg(short, long, default_value = DEFAULT_OUTPUT, help = "Output file name")]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Markdown, help = "Export format")]
        format: ExportFormat,
    },
}
