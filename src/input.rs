// src/input.rs
//
// Field-by-field capture of a new log. The controller is driven one event at
// a time and owns no terminal state, so the transition table can be tested
// without a tty.

use crate::client::LogClient;
use crate::models::{split_tags, LogEntry};
use crate::service::CreateLogRequest;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Backspace,
    Commit,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Title,
    Content,
    Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub kind: FieldKind,
    pub label: &'static str,
    pub hint: &'static str,
    pub required: bool,
}

const TITLE: Field = Field {
    kind: FieldKind::Title,
    label: "Title",
    hint: "Enter a title for your log, then press Enter",
    required: true,
};

const CONTENT: Field = Field {
    kind: FieldKind::Content,
    label: "Content",
    hint: "Enter the content of your log, then press Enter",
    required: true,
};

const TAGS: Field = Field {
    kind: FieldKind::Tags,
    label: "Tags (comma-separated)",
    hint: "Enter tags separated by commas (optional), then press Enter to save",
    required: false,
};

/// Which fields the form asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormLayout {
    /// Title only.
    Quick,
    /// Title, content, then tags.
    Full,
}

impl FormLayout {
    pub fn fields(self) -> Vec<Field> {
        match self {
            FormLayout::Quick => vec![TITLE],
            FormLayout::Full => vec![TITLE, CONTENT, TAGS],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved(LogEntry),
    Failed(String),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Collecting(usize),
    Submitting,
    Done(Outcome),
}

pub struct InputController {
    fields: Vec<Field>,
    buffers: Vec<String>,
    state: State,
    // Set once a failed session has been cancelled by the user.
    dismissed: bool,
}

impl InputController {
    pub fn new(layout: FormLayout) -> Self {
        let fields = layout.fields();
        let buffers = vec![String::new(); fields.len()];
        Self {
            fields,
            buffers,
            state: State::Collecting(0),
            dismissed: false,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn buffer(&self, index: usize) -> &str {
        self.buffers.get(index).map_or("", String::as_str)
    }

    /// True once the session should end: saved, cancelled, or a failure the
    /// user has acknowledged with a cancel.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Done(Outcome::Failed(_)) => self.dismissed,
            State::Done(_) => true,
            _ => false,
        }
    }

    /// Whether a commit right now would send the create request.
    pub fn commit_submits(&self) -> bool {
        match self.state {
            State::Collecting(index) => {
                index + 1 == self.fields.len()
                    && !(self.fields[index].required && self.buffers[index].trim().is_empty())
            }
            _ => false,
        }
    }

    /// Applies one event. A commit on the last field submits synchronously
    /// through `client`, so the returned state is never `Submitting`.
    pub fn handle_event(&mut self, event: InputEvent, client: &dyn LogClient) -> &State {
        let index = match self.state {
            State::Collecting(index) => index,
            State::Done(Outcome::Failed(_)) => {
                if event == InputEvent::Cancel {
                    self.dismissed = true;
                }
                return &self.state;
            }
            State::Submitting | State::Done(_) => return &self.state,
        };

        match event {
            InputEvent::Char(c) if !c.is_control() => self.buffers[index].push(c),
            InputEvent::Char(_) => {}
            InputEvent::Backspace => {
                self.buffers[index].pop();
            }
            InputEvent::Cancel => {
                self.buffers.iter_mut().for_each(String::clear);
                self.state = State::Done(Outcome::Cancelled);
            }
            InputEvent::Commit => {
                if self.fields[index].required && self.buffers[index].trim().is_empty() {
                    return &self.state;
                }
                if index + 1 < self.fields.len() {
                    self.state = State::Collecting(index + 1);
                } else {
                    self.state = State::Submitting;
                    self.submit(client);
                }
            }
        }
        &self.state
    }

    fn submit(&mut self, client: &dyn LogClient) {
        let request = self.build_request();
        debug!(?request, "submitting log");
        self.state = match client.create(request) {
            Ok(entry) => State::Done(Outcome::Saved(entry)),
            Err(e) => State::Done(Outcome::Failed(e.to_string())),
        };
    }

    fn build_request(&self) -> CreateLogRequest {
        let mut request = CreateLogRequest::default();
        for (field, buffer) in self.fields.iter().zip(&self.buffers) {
            match field.kind {
                FieldKind::Title => request.title = Some(buffer.trim().to_string()),
                FieldKind::Content => request.content = Some(buffer.trim().to_string()),
                FieldKind::Tags => request.tags = Some(split_tags(buffer)),
            }
        }
        request
    }
}
