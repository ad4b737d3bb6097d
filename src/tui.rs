// src/tui.rs
//
// Raw-mode terminal driver for the new-log form.

use crate::client::LogClient;
use crate::error::Result;
use crate::input::{FormLayout, InputController, InputEvent, Outcome, State};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Print, Stylize},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

/// How long the success message stays up before the form closes.
pub const EXIT_DELAY: Duration = Duration::from_millis(1000);

/// Holds the terminal in raw mode on the alternate screen until dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Maps a key press onto a controller event. Releases and unbound keys map to nothing.
pub fn event_from_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(InputEvent::Cancel),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Cancel)
        }
        KeyCode::Enter => Some(InputEvent::Commit),
        KeyCode::Backspace | KeyCode::Delete => Some(InputEvent::Backspace),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(InputEvent::Char(c))
        }
        _ => None,
    }
}

/// Runs the form until it is saved or cancelled and returns how it ended.
pub fn run_form(layout: FormLayout, client: &dyn LogClient) -> Result<Outcome> {
    let mut ctl = InputController::new(layout);
    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;

    render(&mut stdout, &ctl, false)?;
    while !ctl.is_finished() {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(input) = event_from_key(&key) else {
            continue;
        };

        if input == InputEvent::Commit && ctl.commit_submits() {
            render(&mut stdout, &ctl, true)?;
        }
        ctl.handle_event(input, client);
        render(&mut stdout, &ctl, false)?;

        if matches!(ctl.state(), State::Done(Outcome::Saved(_))) {
            thread::sleep(EXIT_DELAY);
        }
    }

    Ok(match ctl.state() {
        State::Done(outcome) => outcome.clone(),
        _ => Outcome::Cancelled,
    })
}

fn render(stdout: &mut Stdout, ctl: &InputController, saving: bool) -> io::Result<()> {
    queue!(
        stdout,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Print("Create New Log".cyan().bold()),
        Print("\r\n"),
        Print("Press Ctrl+C to cancel".dark_grey()),
        Print("\r\n\r\n"),
    )?;

    let current = match ctl.state() {
        State::Collecting(index) => Some(*index),
        _ => None,
    };

    for (index, field) in ctl.fields().iter().enumerate() {
        let line = format!("{}: {}", field.label, ctl.buffer(index));
        if current == Some(index) {
            queue!(stdout, Print(line.yellow()), Print("_".yellow()))?;
        } else {
            queue!(stdout, Print(line))?;
        }
        queue!(stdout, Print("\r\n"))?;
    }
    queue!(stdout, Print("\r\n"))?;

    if let Some(index) = current {
        queue!(stdout, Print(ctl.fields()[index].hint.dark_grey()), Print("\r\n"))?;
    }
    if saving {
        queue!(stdout, Print("Saving log...".blue()), Print("\r\n"))?;
    }
    match ctl.state() {
        State::Done(Outcome::Saved(entry)) => queue!(
            stdout,
            Print(format!("✓ Log created successfully! (ID: {})", entry.id).green()),
            Print("\r\n")
        )?,
        State::Done(Outcome::Failed(msg)) => queue!(
            stdout,
            Print(format!("✗ Error: {msg}").red()),
            Print("\r\n"),
            Print("Press Ctrl+C or Esc to exit".dark_grey()),
            Print("\r\n")
        )?,
        _ => {}
    }

    stdout.flush()
}
