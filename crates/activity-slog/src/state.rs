//! Application state and its reducer.
//!
//! [`AppState`] holds the four collections the logger works with. Every
//! mutation goes through [`AppState::reduce`], which applies one [`Action`]
//! and reports what happened as an [`Outcome`]. The reducer never touches
//! storage or prompts; callers gate actions on user confirmation and persist
//! whatever [`Outcome::dirty_key`] names.

use chrono::{DateTime, Utc};

use crate::model::{compare_labels, is_default_label, ButtonConfig, LogEntry, DEFAULT_BUTTONS};

/// The persisted collections, by storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The chronological activity log.
    ActivityLog,
    /// User-added buttons.
    CustomButtons,
    /// Built-in labels the user has hidden.
    DeletedDefaultButtons,
}

impl StorageKey {
    /// All keys, in load order.
    pub const ALL: [Self; 3] = [
        Self::ActivityLog,
        Self::CustomButtons,
        Self::DeletedDefaultButtons,
    ];

    /// The key string used in the store.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActivityLog => "activityLog",
            Self::CustomButtons => "customButtons",
            Self::DeletedDefaultButtons => "deletedDefaultButtons",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How to treat a new custom label that matches an existing custom label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Leave the buttons unchanged.
    #[default]
    Reject,
    /// Add the label again.
    Allow,
}

/// A state transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append an event to the log.
    LogEvent {
        /// Label of the tapped button.
        label: String,
        /// When the tap happened.
        at: DateTime<Utc>,
    },
    /// Arm or disarm delete mode.
    ToggleDeleteMode,
    /// Remove a log entry, addressed by its newest-first position.
    DeleteLogEntry {
        /// Position in the newest-first listing.
        display_index: usize,
    },
    /// Remove a button from the grid (already confirmed).
    DeleteButton(ButtonConfig),
    /// Add a button from raw user input.
    AddButton {
        /// Text as typed; trimmed by the reducer.
        input: String,
        /// What to do with an existing custom label.
        duplicates: DuplicatePolicy,
    },
}

/// Why an action left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// The new label was empty after trimming.
    BlankLabel,
    /// The new label already exists as a custom button.
    DuplicateLabel,
    /// The display index was past the end of the log.
    NoSuchEntry,
    /// The user declined a confirmation.
    Declined,
    /// The user cancelled a text prompt.
    Cancelled,
    /// A button deletion was requested outside delete mode.
    NotArmed,
}

impl std::fmt::Display for Ignored {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankLabel => write!(f, "label is blank"),
            Self::DuplicateLabel => write!(f, "label already exists"),
            Self::NoSuchEntry => write!(f, "no such log entry"),
            Self::Declined => write!(f, "not confirmed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::NotArmed => write!(f, "delete mode is off"),
        }
    }
}

/// What an action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An entry was appended to the log.
    Logged(LogEntry),
    /// Delete mode changed; carries the new value.
    DeleteModeToggled(bool),
    /// A log entry was removed.
    LogEntryDeleted(LogEntry),
    /// A built-in button was hidden.
    DefaultHidden(String),
    /// A custom button was removed.
    CustomRemoved(String),
    /// A built-in label was typed in; it is visible again.
    DefaultRestored {
        /// The built-in label.
        label: String,
        /// Whether it had been hidden before.
        was_hidden: bool,
    },
    /// A custom button was added.
    CustomAdded(String),
    /// Nothing changed.
    Ignored(Ignored),
}

impl Outcome {
    /// The collection that must be written back, if any.
    #[must_use]
    pub fn dirty_key(&self) -> Option<StorageKey> {
        match self {
            Self::Logged(_) | Self::LogEntryDeleted(_) => Some(StorageKey::ActivityLog),
            Self::DefaultHidden(_) | Self::DefaultRestored { .. } => {
                Some(StorageKey::DeletedDefaultButtons)
            }
            Self::CustomRemoved(_) | Self::CustomAdded(_) => Some(StorageKey::CustomButtons),
            Self::DeleteModeToggled(_) | Self::Ignored(_) => None,
        }
    }
}

/// Everything the logger knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Logged events in chronological order.
    pub log: Vec<LogEntry>,
    /// User-added buttons in insertion order.
    pub custom_buttons: Vec<ButtonConfig>,
    /// Built-in labels hidden from the grid.
    pub deleted_default_buttons: Vec<String>,
    /// Whether the next button tap deletes instead of logging.
    pub delete_mode: bool,
}

impl AppState {
    /// The button grid: visible built-ins plus custom buttons, sorted by label.
    #[must_use]
    pub fn visible_buttons(&self) -> Vec<ButtonConfig> {
        let mut buttons: Vec<ButtonConfig> = DEFAULT_BUTTONS
            .iter()
            .filter(|label| !self.deleted_default_buttons.iter().any(|d| d == *label))
            .map(|label| ButtonConfig::default_button(*label))
            .chain(self.custom_buttons.iter().cloned())
            .collect();
        buttons.sort_by(|a, b| compare_labels(&a.text, &b.text));
        buttons
    }

    /// Find a visible button by its exact label.
    #[must_use]
    pub fn find_button(&self, label: &str) -> Option<ButtonConfig> {
        self.visible_buttons().into_iter().find(|b| b.text == label)
    }

    /// The log newest-first, paired with each entry's display index.
    pub fn log_newest_first(&self) -> impl Iterator<Item = (usize, &LogEntry)> {
        self.log.iter().rev().enumerate()
    }

    /// Map a newest-first position to a chronological index.
    #[must_use]
    pub fn chronological_index(&self, display_index: usize) -> Option<usize> {
        self.log
            .len()
            .checked_sub(1)
            .and_then(|last| last.checked_sub(display_index))
    }

    /// Apply one action.
    pub fn reduce(&mut self, action: Action) -> Outcome {
        match action {
            Action::LogEvent { label, at } => {
                let entry = LogEntry::at(label, at);
                self.log.push(entry.clone());
                Outcome::Logged(entry)
            }
            Action::ToggleDeleteMode => {
                self.delete_mode = !self.delete_mode;
                Outcome::DeleteModeToggled(self.delete_mode)
            }
            Action::DeleteLogEntry { display_index } => {
                match self.chronological_index(display_index) {
                    Some(actual) => Outcome::LogEntryDeleted(self.log.remove(actual)),
                    None => Outcome::Ignored(Ignored::NoSuchEntry),
                }
            }
            Action::DeleteButton(button) => {
                let outcome = if button.is_default {
                    if !self.deleted_default_buttons.contains(&button.text) {
                        self.deleted_default_buttons.push(button.text.clone());
                    }
                    Outcome::DefaultHidden(button.text)
                } else {
                    self.custom_buttons.retain(|b| b.text != button.text);
                    Outcome::CustomRemoved(button.text)
                };
                self.delete_mode = false;
                outcome
            }
            Action::AddButton { input, duplicates } => self.add_button(&input, duplicates),
        }
    }

    fn add_button(&mut self, input: &str, duplicates: DuplicatePolicy) -> Outcome {
        let label = input.trim();
        if label.is_empty() {
            return Outcome::Ignored(Ignored::BlankLabel);
        }

        if is_default_label(label) {
            let before = self.deleted_default_buttons.len();
            self.deleted_default_buttons.retain(|d| d != label);
            return Outcome::DefaultRestored {
                label: label.to_string(),
                was_hidden: self.deleted_default_buttons.len() != before,
            };
        }

        if duplicates == DuplicatePolicy::Reject && self.custom_buttons.iter().any(|b| b.text == label)
        {
            return Outcome::Ignored(Ignored::DuplicateLabel);
        }

        self.custom_buttons.push(ButtonConfig::custom(label));
        Outcome::CustomAdded(label.to_string())
    }
}
