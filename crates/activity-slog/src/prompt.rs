//! User prompts.
//!
//! Deletions ask for a yes/no confirmation and adding a button asks for a
//! label. Both go through the [`Prompter`] trait so the logger can be driven
//! by a terminal ([`Console`]) or by canned answers ([`ScriptedPrompter`]).

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::Result;

/// A source of answers to blocking questions.
pub trait Prompter {
    /// Ask a yes/no question. Anything but an explicit yes is a no.
    ///
    /// # Errors
    ///
    /// Returns an error if the question cannot be asked or answered.
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Ask for a line of text. `None` means the user cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the question cannot be asked or answered.
    fn text(&mut self, message: &str) -> Result<Option<String>>;
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        (**self).confirm(message)
    }

    fn text(&mut self, message: &str) -> Result<Option<String>> {
        (**self).text(message)
    }
}

/// Line-oriented prompts over a reader and a writer.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap an input and output stream.
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its line ending. `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Write `text` and flush.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// The underlying output stream.
    #[must_use]
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.say(&format!("{message} [y/N] "))?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    fn text(&mut self, message: &str) -> Result<Option<String>> {
        self.say(&format!("{message} "))?;
        self.read_line()
    }
}

/// Canned answers, consumed in order.
///
/// When the queued confirmations run out the fallback answer is used; when
/// the queued text answers run out every text prompt is cancelled.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    confirms: VecDeque<bool>,
    texts: VecDeque<Option<String>>,
    fallback_confirm: bool,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    /// A prompter that declines everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A prompter that confirms everything.
    #[must_use]
    pub fn always_confirm() -> Self {
        Self {
            fallback_confirm: true,
            ..Self::default()
        }
    }

    /// Queue a yes/no answer.
    #[must_use]
    pub fn confirm_with(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    /// Queue a text answer.
    #[must_use]
    pub fn answer(mut self, text: impl Into<String>) -> Self {
        self.texts.push_back(Some(text.into()));
        self
    }

    /// Queue a cancelled text prompt.
    #[must_use]
    pub fn cancel(mut self) -> Self {
        self.texts.push_back(None);
        self
    }

    /// Every question asked so far.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.asked.push(message.to_string());
        Ok(self.confirms.pop_front().unwrap_or(self.fallback_confirm))
    }

    fn text(&mut self, message: &str) -> Result<Option<String>> {
        self.asked.push(message.to_string());
        Ok(self.texts.pop_front().flatten())
    }
}
