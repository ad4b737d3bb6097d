// src/main.rs

mod cli;
mod client;
mod commands;
mod config;
mod db;
mod error;
mod export;
mod input;
mod models;
mod prompt;
mod service;
mod tui;

use clap::Parser;
use cli::{Cli, Commands};
use client::{LocalClient, LogClient};
use config::Config;
use crossterm::style::Stylize;
use db::Store;
use error::Result;
use export::ExportOptions;
use service::{ListQuery, LogService};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.db, cli.verbose)?;
    setup_logging(config.verbosity);

    let service = LogService::new(Store::open(&config.db_path)?);
    let result = dispatch(&LocalClient::new(&service), cli.id, cli.command);
    let closed = service.close();
    result.and(closed)
}

fn dispatch(client: &dyn LogClient, id: Option<String>, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::New { text, content, tags, quick }) => {
            commands::handle_new(client, text, content, tags, quick)
        }
        Some(Commands::List { limit, search }) => {
            commands::handle_list(client, ListQuery { search, limit })
        }
        Some(Commands::Delete { id }) => commands::handle_delete(client, &id),
        Some(Commands::Edit { id }) => commands::handle_edit(client, &id),
        Some(Commands::Export { output, format }) => {
            commands::handle_export(client, &ExportOptions { output, format })
        }
        None => match id {
            Some(id) => commands::handle_view(client, &id),
            None => commands::handle_list(client, ListQuery::default()),
        },
    }
}

fn setup_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config::log_filter(verbosity))),
        )
        .init();
}
