//! Interactive session.
//!
//! Keeps one [`ActivityLogger`] alive across taps so delete mode can be armed
//! with one command and used by the next. Commands are read line by line from
//! the same console that answers confirmation and text prompts.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::app::ActivityLogger;
use crate::error::{Error, Result};
use crate::prompt::Console;
use crate::render::{buttons_text, log_text, outcome_text, Clock};
use crate::state::Outcome;

const HELP: &str = "\
Commands:
  <n> or <label>  tap a button
  tap <label>     tap a button whose label looks like a command
  +               add an activity
  d               toggle delete mode
  x <n>           delete log entry #n
  l               show the log
  b               show the buttons
  ?               this help
  q               quit
";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Tap the button at this 1-based grid position.
    TapPosition(usize),
    /// Tap the button with this label.
    TapLabel(String),
    /// Add a button.
    Add,
    /// Toggle delete mode.
    ToggleDelete,
    /// Delete the log entry at this 1-based position.
    DeleteEntry(usize),
    /// Show the log.
    List,
    /// Show the buttons.
    Buttons,
    /// Show help.
    Help,
    /// End the session.
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Returns `None` for input that cannot be a command.
    ///
    /// Bare input is matched against the command words first, then read as a
    /// grid position, then as a label. `tap <label>` always means a label, so
    /// buttons named `d`, `q` or `5` stay reachable.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            "" | "b" => return Some(Self::Buttons),
            "+" => return Some(Self::Add),
            "d" => return Some(Self::ToggleDelete),
            "l" => return Some(Self::List),
            "?" | "h" | "help" => return Some(Self::Help),
            "q" | "quit" | "exit" => return Some(Self::Quit),
            _ => {}
        }

        if let Some(label) = line.strip_prefix("tap ") {
            let label = label.trim();
            return (!label.is_empty()).then(|| Self::TapLabel(label.to_string()));
        }
        if let Some(rest) = line.strip_prefix("x ") {
            return rest
                .trim()
                .parse()
                .ok()
                .filter(|position| *position > 0)
                .map(Self::DeleteEntry);
        }
        if let Ok(position) = line.parse() {
            return Some(Self::TapPosition(position));
        }
        Some(Self::TapLabel(line.to_string()))
    }
}

/// Run the interactive loop until the user quits or input ends.
///
/// # Errors
///
/// Returns an error if the console or the store fails. Mistyped labels and
/// positions are reported and the loop continues.
pub fn run<R: BufRead, W: Write>(
    app: &mut ActivityLogger<Console<R, W>>,
    clock: Clock,
    log_limit: Option<usize>,
) -> Result<()> {
    draw(app, clock, log_limit)?;

    loop {
        let prompt = if app.delete_mode() { "delete> " } else { "> " };
        app.prompter_mut().say(prompt)?;
        let Some(line) = app.prompter_mut().read_line()? else {
            app.prompter_mut().say("\n")?;
            break;
        };

        let Some(command) = SessionCommand::parse(&line) else {
            app.prompter_mut().say("Unrecognized command. Type ? for help.\n")?;
            continue;
        };
        debug!("Session command {:?}", command);

        match execute(app, command, clock, log_limit) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_user_error() => {
                app.prompter_mut().say(&format!("{e}\n"))?;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Execute one command. Returns `false` when the session should end.
fn execute<R: BufRead, W: Write>(
    app: &mut ActivityLogger<Console<R, W>>,
    command: SessionCommand,
    clock: Clock,
    log_limit: Option<usize>,
) -> Result<bool> {
    let outcome = match command {
        SessionCommand::Quit => return Ok(false),
        SessionCommand::Help => {
            app.prompter_mut().say(HELP)?;
            return Ok(true);
        }
        SessionCommand::Buttons => {
            let text = buttons_text(&app.visible_buttons(), app.delete_mode());
            app.prompter_mut().say(&text)?;
            return Ok(true);
        }
        SessionCommand::List => {
            let text = log_text(app.state(), clock, log_limit);
            app.prompter_mut().say(&text)?;
            return Ok(true);
        }
        SessionCommand::ToggleDelete => {
            let armed = app.toggle_delete_mode();
            Outcome::DeleteModeToggled(armed)
        }
        SessionCommand::Add => app.add_new_button()?,
        SessionCommand::TapLabel(label) => app.tap(&label)?,
        SessionCommand::TapPosition(position) => {
            let label = position
                .checked_sub(1)
                .and_then(|i| app.visible_buttons().into_iter().nth(i))
                .map(|b| b.text)
                .ok_or_else(|| Error::unknown_button(format!("#{position}")))?;
            app.tap(&label)?
        }
        SessionCommand::DeleteEntry(position) => {
            app.delete_log_entry(position.saturating_sub(1))?
        }
    };

    app.prompter_mut().say(&format!("{}\n", outcome_text(&outcome)))?;
    if outcome.dirty_key().is_some() {
        draw(app, clock, log_limit)?;
    }
    Ok(true)
}

fn draw<R: BufRead, W: Write>(
    app: &mut ActivityLogger<Console<R, W>>,
    clock: Clock,
    log_limit: Option<usize>,
) -> Result<()> {
    let screen = format!(
        "\nslog\n\n{}\n{}",
        buttons_text(&app.visible_buttons(), app.delete_mode()),
        log_text(app.state(), clock, log_limit)
    );
    app.prompter_mut().say(&screen)
}
