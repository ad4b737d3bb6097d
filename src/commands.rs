// src/commands.rs

use crate::client::LogClient;
use crate::error::{Result, TlogError};
use crate::export::{self, ExportOptions, ExportOutcome};
use crate::input::{FormLayout, Outcome};
use crate::models::{split_tags, LogEntry};
use crate::prompt::{self, Prompter};
use crate::service::{CreateLogRequest, ListQuery};
use crate::tui;
use chrono::Utc;
use crossterm::style::Stylize;
use std::io;

const PREVIEW_CHARS: usize = 100;

/// Handles 'new'
pub fn handle_new(
    client: &dyn LogClient,
    text: Option<String>,
    content: Option<String>,
    tags: Option<String>,
    quick: bool,
) -> Result<()> {
    let Some(title) = text else {
        let layout = if quick { FormLayout::Quick } else { FormLayout::Full };
        return match tui::run_form(layout, client)? {
            Outcome::Saved(entry) => {
                println!("{}", format!("✓ Log created successfully! (ID: {})", entry.id).green());
                Ok(())
            }
            Outcome::Cancelled => {
                println!("{}", "Cancelled. No log was saved.".yellow());
                Ok(())
            }
            Outcome::Failed(msg) => Err(TlogError::Service(msg)),
        };
    };

    if title.trim().is_empty() {
        return Err(TlogError::Validation("Log is required!".to_string()));
    }

    let entry = client.create(CreateLogRequest {
        title: Some(title),
        content,
        tags: tags.as_deref().map(split_tags),
    })?;
    println!("{}", format!("✓ Log created successfully! (ID: {})", entry.id).green());
    Ok(())
}

/// Handles 'list', and the bare invocation
pub fn handle_list(client: &dyn LogClient, query: ListQuery) -> Result<()> {
    let logs = client.list(query)?;
    if logs.is_empty() {
        println!("{}", "No logs found.".yellow());
        return Ok(());
    }

    println!("{}", format!("\n Found {} log(s):\n", logs.len()).blue().bold());
    for log in &logs {
        print_log(log);
    }
    Ok(())
}

fn print_log(log: &LogEntry) {
    println!("{}", format!("#{} {}", log.id, log.title).cyan());
    if !log.content.is_empty() {
        println!("   {}", preview(&log.content));
    }
    if !log.tags.is_empty() {
        println!("{}", format!("   Tags: {}", log.tags.join(", ")).blue());
    }
    println!("{}\n", format!("   {}", log.created_display()).dark_grey());
}

fn preview(content: &str) -> String {
    let flat = content.replace('\n', " ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

/// Handles a bare ID argument
pub fn handle_view(client: &dyn LogClient, id: &str) -> Result<()> {
    let mut p = Prompter::new(io::stdin().lock(), io::stdout());
    prompt::view_log(client, id, &mut p)
}

/// Handles 'delete'
pub fn handle_delete(client: &dyn LogClient, id: &str) -> Result<()> {
    let mut p = Prompter::new(io::stdin().lock(), io::stdout());
    prompt::delete_log(client, id, &mut p)?;
    Ok(())
}

/// Handles 'edit'
pub fn handle_edit(client: &dyn LogClient, id: &str) -> Result<()> {
    let mut p = Prompter::new(io::stdin().lock(), io::stdout());
    prompt::edit_log(client, id, &mut p)?;
    Ok(())
}

/// Handles 'export'. Any failure here ends the process with an error.
pub fn handle_export(client: &dyn LogClient, opts: &ExportOptions) -> Result<()> {
    println!("Fetching logs...");
    match export::export_logs(client, opts, Utc::now())? {
        ExportOutcome::NothingToExport => println!("{}", "No logs found to export.".yellow()),
        ExportOutcome::Written { count, path } => println!(
            "{}",
            format!("✓ Successfully exported {} logs to {}", count, path.display()).green()
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "x".repeat(150);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));

        assert_eq!(preview("line one\nline two"), "line one line two");
    }
}
