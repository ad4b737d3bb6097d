// src/export.rs

use crate::client::LogClient;
use crate::error::Result;
use crate::models::LogEntry;
use crate::service::ListQuery;
use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_OUTPUT: &str = "logs.md";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Markdown,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub output: PathBuf,
    pub format: ExportFormat,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: ExportFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The store was empty; no file was touched.
    NothingToExport,
    Written { count: usize, path: PathBuf },
}

/// Writes every entry, oldest first, to `opts.output`, replacing any existing file.
pub fn export_logs(
    client: &dyn LogClient,
    opts: &ExportOptions,
    exported_at: DateTime<Utc>,
) -> Result<ExportOutcome> {
    let logs = client.list(ListQuery::default())?;
    if logs.is_empty() {
        return Ok(ExportOutcome::NothingToExport);
    }

    let document = render(&logs, opts.format, exported_at);
    std::fs::write(&opts.output, document)?;
    info!(count = logs.len(), path = %opts.output.display(), "logs exported");

    Ok(ExportOutcome::Written {
        count: logs.len(),
        path: opts.output.clone(),
    })
}

pub fn render(logs: &[LogEntry], format: ExportFormat, exported_at: DateTime<Utc>) -> String {
    let stamp = exported_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    match format {
        ExportFormat::Markdown => render_markdown(logs, &stamp),
        ExportFormat::Text => render_text(logs, &stamp),
    }
}

// `write!` into a String cannot fail, hence the ignored results below.
fn render_markdown(logs: &[LogEntry], stamp: &str) -> String {
    let mut doc = String::from("# Exported Logs\n\n");
    let _ = writeln!(doc, "Total logs: {}", logs.len());
    let _ = writeln!(doc, "Exported on: {stamp}\n");
    doc.push_str("---\n\n");

    for log in logs {
        let _ = writeln!(doc, "## #{} {}\n", log.id, one_line(&log.title));
        let _ = writeln!(doc, "**Created:** {}\n", log.created_display());
        if !log.content.is_empty() {
            for line in log.content.lines() {
                let _ = writeln!(doc, "> {line}");
            }
            doc.push('\n');
        }
        if !log.tags.is_empty() {
            let _ = writeln!(doc, "**Tags:** {}\n", one_line(&log.tags.join(", ")));
        }
        doc.push_str("---\n\n");
    }
    doc
}

/// Folds line breaks so a value cannot start a heading or rule of its own.
fn one_line(value: &str) -> String {
    value.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

fn render_text(logs: &[LogEntry], stamp: &str) -> String {
    let rule = "=".repeat(40);
    let mut doc = String::from("EXPORTED LOGS\n");
    let _ = writeln!(doc, "Total logs: {}", logs.len());
    let _ = writeln!(doc, "Exported on: {stamp}");
    let _ = writeln!(doc, "{rule}\n");

    for log in logs {
        let _ = writeln!(doc, "[#{}] {}", log.id, log.title);
        let _ = writeln!(doc, "Created: {}", log.created_display());
        if !log.tags.is_empty() {
            let _ = writeln!(doc, "Tags: {}", log.tags.join(", "));
        }
        if !log.content.is_empty() {
            let _ = writeln!(doc, "{}", log.content);
        }
        let _ = writeln!(doc, "{}\n", "-".repeat(40));
    }
    doc
}
