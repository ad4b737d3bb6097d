// src/prompt.rs
//
// Line-based view / edit / delete flows. All terminal I/O goes through a
// `Prompter` so the flows can be driven from a buffer in tests.

use crate::client::LogClient;
use crate::error::Result;
use crate::models::{split_tags, LogEntry};
use crate::service::UpdateLogRequest;
use crossterm::style::Stylize;
use std::fmt::Display;
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `question` and reads one line. End of input reads as an empty answer.
    pub fn ask(&mut self, question: impl Display) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Delete,
    Edit,
    Quit,
}

impl Action {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "d" => Some(Action::Delete),
            "e" => Some(Action::Edit),
            "q" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Shows one entry and lets the user delete it, edit it, or quit.
pub fn view_log<R: BufRead, W: Write>(
    client: &dyn LogClient,
    id: &str,
    p: &mut Prompter<R, W>,
) -> Result<()> {
    let log = client.get(id)?;

    p.say(format!("\n📖 Log #{}: {}\n", log.id, log.title).blue().bold())?;
    p.say(format!("Created: {}", log.created_display()).dark_grey())?;
    if !log.content.is_empty() {
        p.say(format!("\n{}", log.content))?;
    }
    if !log.tags.is_empty() {
        p.say(format!("Tags: {}", log.tags.join(", ")).blue())?;
    }

    p.say("\nOptions:".yellow())?;
    p.say("  - Press 'd' to delete this log".dark_grey())?;
    p.say("  - Press 'e' to edit this log".dark_grey())?;
    p.say("  - Press 'q' to quit".dark_grey())?;

    let answer = p.ask("\nAction (d/e/q): ".blue())?;
    match Action::parse(&answer) {
        Some(Action::Delete) => {
            delete_log(client, id, p)?;
        }
        Some(Action::Edit) => {
            edit_entry(client, &log, p)?;
        }
        Some(Action::Quit) => p.say("Goodbye!".dark_grey())?,
        None => p.say("Invalid option".yellow())?,
    }
    Ok(())
}

/// Asks for confirmation, then deletes. Returns the removed entry, or `None` if declined.
pub fn delete_log<R: BufRead, W: Write>(
    client: &dyn LogClient,
    id: &str,
    p: &mut Prompter<R, W>,
) -> Result<Option<LogEntry>> {
    let answer = p.ask(format!("Are you sure you want to delete log #{id}? (y/N): ").red())?;
    let answer = answer.trim().to_lowercase();
    if answer != "y" && answer != "yes" {
        p.say("Deletion cancelled".yellow())?;
        return Ok(None);
    }

    let deleted = client.delete(id)?;
    p.say(format!("✓ Log #{} deleted successfully", deleted.id).green())?;
    Ok(Some(deleted))
}

/// Fetches an entry, then edits it with [`edit_entry`].
pub fn edit_log<R: BufRead, W: Write>(
    client: &dyn LogClient,
    id: &str,
    p: &mut Prompter<R, W>,
) -> Result<LogEntry> {
    let current = client.get(id)?;
    edit_entry(client, &current, p)
}

/// Prompts for each editable field of `current`; a blank answer keeps the current value.
fn edit_entry<R: BufRead, W: Write>(
    client: &dyn LogClient,
    current: &LogEntry,
    p: &mut Prompter<R, W>,
) -> Result<LogEntry> {
    p.say(format!("\n✏️  Edit Log #{}\n", current.id).blue().bold())?;
    p.say("Press Enter to keep current value\n".dark_grey())?;

    let title = keep_or_replace(p.ask(format!("Title [{}]: ", current.title).yellow())?, &current.title);
    let content =
        keep_or_replace(p.ask(format!("Content [{}]: ", current.content).yellow())?, &current.content);
    let joined = current.tags.join(", ");
    let tags_answer = p.ask(format!("Tags [{joined}]: ").yellow())?;
    let tags = if tags_answer.trim().is_empty() {
        current.tags.clone()
    } else {
        split_tags(&tags_answer)
    };

    p.say("\nUpdating log...".blue())?;
    let updated = client.update(
        &current.id.to_string(),
        UpdateLogRequest {
            title: Some(title),
            content: Some(content),
            tags: Some(tags),
        },
    )?;
    p.say(format!("✓ Log #{} updated successfully", updated.id).green())?;
    Ok(updated)
}

fn keep_or_replace(answer: String, current: &str) -> String {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        current.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LocalClient;
    use crate::db::Store;
    use crate::error::TlogError;
    use crate::service::{CreateLogRequest, ListQuery, LogService};
    use std::cell::Cell;
    use std::io::Cursor;

    fn seeded() -> (LogService, String) {
        let service = LogService::new(Store::open_in_memory().unwrap());
        let entry = LocalClient::new(&service)
            .create(CreateLogRequest {
                title: Some("Original".to_string()),
                content: Some("body".to_string()),
                tags: Some(vec!["a".to_string(), "b".to_string()]),
            })
            .unwrap();
        (service, entry.id.to_string())
    }

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse("D"), Some(Action::Delete));
        assert_eq!(Action::parse(" e\n"), Some(Action::Edit));
        assert_eq!(Action::parse("q"), Some(Action::Quit));
        assert_eq!(Action::parse("x"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn test_edit_blank_keeps_current_values() {
        let (service, id) = seeded();
        let client = LocalClient::new(&service);
        let mut p = prompter("\n\n\n");

        let updated = edit_log(&client, &id, &mut p).unwrap();
        assert_eq!(updated.title, "Original");
        assert_eq!(updated.content, "body");
        assert_eq!(updated.tags, vec!["a", "b"]);
        assert!(output(p).contains("Title [Original]: "));
    }

    #[test]
    fn test_edit_replaces_given_fields() {
        let (service, id) = seeded();
        let client = LocalClient::new(&service);
        let mut p = prompter("Renamed\n\nx, y\n");

        let updated = edit_log(&client, &id, &mut p).unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.content, "body");
        assert_eq!(updated.tags, vec!["x", "y"]);
        assert_eq!(client.get(&id).unwrap(), updated);
    }

    #[test]
    fn test_delete_requires_yes() {
        let (service, id) = seeded();
        let client = LocalClient::new(&service);

        let mut p = prompter("n\n");
        assert!(delete_log(&client, &id, &mut p).unwrap().is_none());
        assert!(output(p).contains("Deletion cancelled"));
        assert_eq!(client.list(ListQuery::default()).unwrap().len(), 1);

        let mut p = prompter("YES\n");
        let deleted = delete_log(&client, &id, &mut p).unwrap().unwrap();
        assert_eq!(deleted.title, "Original");
        assert!(client.list(ListQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_reports_not_found() {
        let (service, _) = seeded();
        let client = LocalClient::new(&service);
        let mut p = prompter("y\n");
        assert!(matches!(delete_log(&client, "77", &mut p), Err(TlogError::NotFound(_))));
    }

    #[test]
    fn test_view_then_quit() {
        let (service, id) = seeded();
        let client = LocalClient::new(&service);
        let mut p = prompter("q\n");
        view_log(&client, &id, &mut p).unwrap();
        let out = output(p);
        assert!(out.contains("Log #1: Original"));
        assert!(out.contains("Tags: a, b"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_view_then_delete() {
        let (service, id) = seeded();
        let client = LocalClient::new(&service);
        let mut p = prompter("d\ny\n");
        view_log(&client, &id, &mut p).unwrap();
        assert!(matches!(client.get(&id), Err(TlogError::NotFound(_))));
    }

    #[test]
    fn test_view_invalid_option() {
        let (service, id) = seeded();
        let client = LocalClient::new(&service);
        let mut p = prompter("z\n");
        view_log(&client, &id, &mut p).unwrap();
        assert!(output(p).contains("Invalid option"));
        assert!(client.get(&id).is_ok());
    }

    struct CountingClient<'a> {
        inner: LocalClient<'a>,
        gets: Cell<usize>,
    }

    impl LogClient for CountingClient<'_> {
        fn create(&self, req: CreateLogRequest) -> Result<LogEntry> {
            self.inner.create(req)
        }
        fn list(&self, query: ListQuery) -> Result<Vec<LogEntry>> {
            self.inner.list(query)
        }
        fn get(&self, id: &str) -> Result<LogEntry> {
            self.gets.set(self.gets.get() + 1);
            self.inner.get(id)
        }
        fn update(&self, id: &str, req: UpdateLogRequest) -> Result<LogEntry> {
            self.inner.update(id, req)
        }
        fn delete(&self, id: &str) -> Result<LogEntry> {
            self.inner.delete(id)
        }
    }

    #[test]
    fn test_view_then_edit_fetches_once() {
        let (service, id) = seeded();
        let client = CountingClient {
            inner: LocalClient::new(&service),
            gets: Cell::new(0),
        };
        let mut p = prompter("e
Renamed


");
        view_log(&client, &id, &mut p).unwrap();

        assert_eq!(client.gets.get(), 1);
        assert!(output(p).contains("Log #1 updated successfully"));
        let stored = client.inner.get(&id).unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.content, "body");
        assert_eq!(stored.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_view_unknown_id() {
        let (service, _) = seeded();
        let client = LocalClient::new(&service);
        let mut p = prompter("");
        assert!(matches!(view_log(&client, "abc", &mut p), Err(TlogError::NotFound(_))));
    }
}
