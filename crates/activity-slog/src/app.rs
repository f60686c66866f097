//! The activity logger.
//!
//! [`ActivityLogger`] owns the state, the store and a [`Prompter`]. Each
//! operation asks whatever question it needs, runs the reducer and writes the
//! touched collection back before returning.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::ButtonConfig;
use crate::prompt::Prompter;
use crate::state::{Action, AppState, DuplicatePolicy, Ignored, Outcome};
use crate::storage::Storage;

/// Question asked before removing a log entry.
pub const CONFIRM_DELETE_ENTRY: &str = "Are you sure you want to delete this log entry?";

/// Question asked when adding a button.
pub const PROMPT_NEW_ACTIVITY: &str = "Enter new activity:";

/// Question asked before removing a button.
#[must_use]
pub fn confirm_delete_button(label: &str) -> String {
    format!("Delete \"{label}\" button?")
}

/// State, storage and prompts for one logging session.
#[derive(Debug)]
pub struct ActivityLogger<P> {
    storage: Storage,
    state: AppState,
    prompter: P,
    duplicates: DuplicatePolicy,
}

impl<P: Prompter> ActivityLogger<P> {
    /// Load the persisted state from `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn initialize(storage: Storage, prompter: P, duplicates: DuplicatePolicy) -> Result<Self> {
        let state = storage.load_state()?;
        debug!(
            "Loaded {} log entries, {} custom buttons, {} hidden defaults",
            state.log.len(),
            state.custom_buttons.len(),
            state.deleted_default_buttons.len()
        );
        Ok(Self {
            storage,
            state,
            prompter,
            duplicates,
        })
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The backing store.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// The prompter.
    #[must_use]
    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// The prompter, mutably.
    pub fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    /// Whether the next tap deletes a button.
    #[must_use]
    pub fn delete_mode(&self) -> bool {
        self.state.delete_mode
    }

    /// The button grid in display order.
    #[must_use]
    pub fn visible_buttons(&self) -> Vec<ButtonConfig> {
        self.state.visible_buttons()
    }

    /// Record a tap on `label` with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be written back.
    pub fn log_event(&mut self, label: &str) -> Result<Outcome> {
        self.dispatch(Action::LogEvent {
            label: label.to_string(),
            at: Utc::now(),
        })
    }

    /// Arm or disarm delete mode. Returns the new value.
    pub fn toggle_delete_mode(&mut self) -> bool {
        self.state.reduce(Action::ToggleDeleteMode);
        debug!("Delete mode {}", if self.state.delete_mode { "armed" } else { "off" });
        self.state.delete_mode
    }

    /// Remove the entry at `display_index` in the newest-first listing,
    /// after confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LogEntryNotFound`] if the index is past the end of the
    /// log, or an error if prompting or writing fails.
    pub fn delete_log_entry(&mut self, display_index: usize) -> Result<Outcome> {
        let len = self.state.log.len();
        if display_index >= len {
            return Err(Error::LogEntryNotFound {
                index: display_index,
                len,
            });
        }

        if !self.prompter.confirm(CONFIRM_DELETE_ENTRY)? {
            debug!("Log entry deletion declined");
            return Ok(Outcome::Ignored(Ignored::Declined));
        }

        self.dispatch(Action::DeleteLogEntry { display_index })
    }

    /// Remove `button` from the grid, after confirmation.
    ///
    /// Only acts while delete mode is armed. A declined confirmation leaves
    /// delete mode armed; a confirmed deletion disarms it.
    ///
    /// # Errors
    ///
    /// Returns an error if prompting or writing fails.
    pub fn delete_button(&mut self, button: &ButtonConfig) -> Result<Outcome> {
        if !self.state.delete_mode {
            return Ok(Outcome::Ignored(Ignored::NotArmed));
        }

        if !self.prompter.confirm(&confirm_delete_button(&button.text))? {
            debug!("Deletion of button {:?} declined", button.text);
            return Ok(Outcome::Ignored(Ignored::Declined));
        }

        self.dispatch(Action::DeleteButton(button.clone()))
    }

    /// Ask for a label and add it to the grid.
    ///
    /// A built-in label un-hides that button instead of adding a new one.
    ///
    /// # Errors
    ///
    /// Returns an error if prompting or writing fails.
    pub fn add_new_button(&mut self) -> Result<Outcome> {
        let Some(input) = self.prompter.text(PROMPT_NEW_ACTIVITY)? else {
            return Ok(Outcome::Ignored(Ignored::Cancelled));
        };

        self.dispatch(Action::AddButton {
            input,
            duplicates: self.duplicates,
        })
    }

    /// Tap the button labeled `label`.
    ///
    /// Logs an event normally, or deletes the button while delete mode is
    /// armed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownButton`] if no visible button has that label,
    /// or an error if prompting or writing fails.
    pub fn tap(&mut self, label: &str) -> Result<Outcome> {
        let button = self
            .state
            .find_button(label)
            .ok_or_else(|| Error::unknown_button(label))?;

        if self.state.delete_mode {
            self.delete_button(&button)
        } else {
            self.log_event(&button.text)
        }
    }

    fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        let outcome = self.state.reduce(action);
        if let Some(key) = outcome.dirty_key() {
            self.storage.persist(&self.state, key)?;
        }
        report(&outcome);
        Ok(outcome)
    }
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Logged(entry) => debug!("Logged {}", entry.event),
        Outcome::LogEntryDeleted(entry) => debug!("Deleted log entry {}", entry.event),
        Outcome::DefaultHidden(label) => debug!("Hid button {}", label),
        Outcome::CustomRemoved(label) => debug!("Removed button {}", label),
        Outcome::DefaultRestored { label, was_hidden } => {
            if *was_hidden {
                debug!("Restored button {}", label);
            } else {
                debug!("Button {} is already visible", label);
            }
        }
        Outcome::CustomAdded(label) => debug!("Added button {}", label),
        Outcome::Ignored(Ignored::DuplicateLabel) => {
            debug!("A button with that label already exists");
        }
        Outcome::Ignored(Ignored::NoSuchEntry) => warn!("Log entry vanished before deletion"),
        Outcome::Ignored(reason) => debug!("Nothing changed: {}", reason),
        Outcome::DeleteModeToggled(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_BUTTONS;
    use crate::prompt::ScriptedPrompter;
    use crate::state::StorageKey;

    fn logger(prompter: ScriptedPrompter) -> ActivityLogger<ScriptedPrompter> {
        crate::logging::init_test_logging();
        let storage = Storage::open_in_memory().unwrap();
        ActivityLogger::initialize(storage, prompter, DuplicatePolicy::Reject).unwrap()
    }

    fn reloaded(app: &ActivityLogger<ScriptedPrompter>) -> AppState {
        app.storage().load_state().unwrap()
    }

    fn labels(app: &ActivityLogger<ScriptedPrompter>) -> Vec<String> {
        app.visible_buttons().into_iter().map(|b| b.text).collect()
    }

    #[test]
    fn test_initialize_empty_store() {
        let app = logger(ScriptedPrompter::new());

        assert!(app.state().log.is_empty());
        assert!(!app.delete_mode());
        assert_eq!(app.visible_buttons().len(), DEFAULT_BUTTONS.len());
    }

    #[test]
    fn test_log_event_persists_each_call() {
        let mut app = logger(ScriptedPrompter::new());

        for label in ["lunch", "dinner", "lunch"] {
            app.log_event(label).unwrap();
            assert_eq!(reloaded(&app).log, app.state().log);
        }

        let events: Vec<&str> = app.state().log.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(events, vec!["lunch", "dinner", "lunch"]);
    }

    #[test]
    fn test_reload_matches_memory_after_rapid_logging() {
        let mut app = logger(ScriptedPrompter::new());

        for i in 0..20 {
            app.log_event(if i % 2 == 0 { "lunch" } else { "walk 1 mile" })
                .unwrap();
            assert_eq!(reloaded(&app).log, app.state().log);
        }
        assert_eq!(app.state().log.len(), 20);
    }

    #[test]
    fn test_tap_logs_and_newest_is_shown_first() {
        let mut app = logger(ScriptedPrompter::new());
        app.tap("breakfast").unwrap();

        let outcome = app.tap("lunch").unwrap();

        assert!(matches!(outcome, Outcome::Logged(ref e) if e.event == "lunch"));
        let (index, newest) = app.state().log_newest_first().next().unwrap();
        assert_eq!(index, 0);
        assert_eq!(newest.event, "lunch");
    }

    #[test]
    fn test_tap_unknown_label() {
        let mut app = logger(ScriptedPrompter::new());

        let err = app.tap("juggling").unwrap_err();
        assert!(matches!(err, Error::UnknownButton { .. }));
        assert!(app.state().log.is_empty());
    }

    #[test]
    fn test_delete_log_entry_confirmed() {
        let mut app = logger(ScriptedPrompter::new().confirm_with(true));
        app.log_event("a").unwrap();
        app.log_event("b").unwrap();
        app.log_event("c").unwrap();

        let outcome = app.delete_log_entry(0).unwrap();

        assert!(matches!(outcome, Outcome::LogEntryDeleted(ref e) if e.event == "c"));
        assert_eq!(app.state().log.len(), 2);
        assert_eq!(reloaded(&app).log, app.state().log);
        assert_eq!(app.prompter().asked(), [CONFIRM_DELETE_ENTRY.to_string()]);
    }

    #[test]
    fn test_delete_log_entry_declined_leaves_log() {
        let mut app = logger(ScriptedPrompter::new().confirm_with(false));
        app.log_event("a").unwrap();
        let before = app.state().log.clone();

        let outcome = app.delete_log_entry(0).unwrap();

        assert_eq!(outcome, Outcome::Ignored(Ignored::Declined));
        assert_eq!(app.state().log, before);
        assert_eq!(reloaded(&app).log, before);
    }

    #[test]
    fn test_delete_log_entry_out_of_range_does_not_prompt() {
        let mut app = logger(ScriptedPrompter::always_confirm());
        app.log_event("a").unwrap();

        let err = app.delete_log_entry(1).unwrap_err();

        assert!(matches!(err, Error::LogEntryNotFound { index: 1, len: 1 }));
        assert!(app.prompter().asked().is_empty());
    }

    #[test]
    fn test_delete_default_button_flow() {
        let mut app = logger(ScriptedPrompter::new().confirm_with(true));
        assert!(app.toggle_delete_mode());

        let outcome = app.tap("dinner").unwrap();

        assert_eq!(outcome, Outcome::DefaultHidden("dinner".to_string()));
        assert!(!labels(&app).contains(&"dinner".to_string()));
        assert!(!app.delete_mode());
        assert!(app.state().log.is_empty());
        assert_eq!(
            reloaded(&app).deleted_default_buttons,
            vec!["dinner".to_string()]
        );
        assert_eq!(
            app.prompter().asked(),
            [confirm_delete_button("dinner")]
        );
    }

    #[test]
    fn test_declined_button_deletion_keeps_delete_mode() {
        let mut app = logger(ScriptedPrompter::new().confirm_with(false).confirm_with(true));
        app.toggle_delete_mode();

        assert_eq!(
            app.tap("lunch").unwrap(),
            Outcome::Ignored(Ignored::Declined)
        );
        assert!(app.delete_mode());
        assert!(labels(&app).contains(&"lunch".to_string()));

        assert_eq!(
            app.tap("breakfast").unwrap(),
            Outcome::DefaultHidden("breakfast".to_string())
        );
        assert!(!app.delete_mode());
    }

    #[test]
    fn test_delete_custom_button_flow() {
        let mut app = logger(
            ScriptedPrompter::new()
                .answer("swim")
                .confirm_with(true),
        );
        app.add_new_button().unwrap();
        app.toggle_delete_mode();

        let outcome = app.tap("swim").unwrap();

        assert_eq!(outcome, Outcome::CustomRemoved("swim".to_string()));
        assert!(app.state().custom_buttons.is_empty());
        assert!(reloaded(&app).custom_buttons.is_empty());
        assert!(!app.delete_mode());
    }

    #[test]
    fn test_delete_button_requires_delete_mode() {
        let mut app = logger(ScriptedPrompter::always_confirm());

        let outcome = app
            .delete_button(&ButtonConfig::default_button("lunch"))
            .unwrap();

        assert_eq!(outcome, Outcome::Ignored(Ignored::NotArmed));
        assert!(app.prompter().asked().is_empty());
    }

    #[test]
    fn test_toggle_twice_cancels() {
        let mut app = logger(ScriptedPrompter::new());
        assert!(app.toggle_delete_mode());
        assert!(!app.toggle_delete_mode());

        app.tap("lunch").unwrap();
        assert_eq!(app.state().log.len(), 1);
    }

    #[test]
    fn test_add_new_button_persists() {
        let mut app = logger(ScriptedPrompter::new().answer("  swim  "));

        let outcome = app.add_new_button().unwrap();

        assert_eq!(outcome, Outcome::CustomAdded("swim".to_string()));
        assert_eq!(
            reloaded(&app).custom_buttons,
            vec![ButtonConfig::custom("swim")]
        );
        assert_eq!(app.prompter().asked(), [PROMPT_NEW_ACTIVITY.to_string()]);
    }

    #[test]
    fn test_add_new_button_cancelled_or_blank() {
        let mut app = logger(ScriptedPrompter::new().cancel().answer("   "));

        assert_eq!(
            app.add_new_button().unwrap(),
            Outcome::Ignored(Ignored::Cancelled)
        );
        assert_eq!(
            app.add_new_button().unwrap(),
            Outcome::Ignored(Ignored::BlankLabel)
        );
        assert!(app.storage().keys().unwrap().is_empty());
    }

    #[test]
    fn test_add_default_label_restores_hidden_button() {
        let mut app = logger(
            ScriptedPrompter::new()
                .confirm_with(true)
                .answer("lunch"),
        );
        app.toggle_delete_mode();
        app.tap("lunch").unwrap();
        assert!(!labels(&app).contains(&"lunch".to_string()));

        let outcome = app.add_new_button().unwrap();

        assert_eq!(
            outcome,
            Outcome::DefaultRestored {
                label: "lunch".to_string(),
                was_hidden: true,
            }
        );
        assert!(labels(&app).contains(&"lunch".to_string()));
        assert!(app.state().custom_buttons.is_empty());
        assert!(reloaded(&app).deleted_default_buttons.is_empty());
    }

    #[test]
    fn test_add_duplicate_custom_label_rejected() {
        let mut app = logger(ScriptedPrompter::new().answer("swim").answer("swim"));

        app.add_new_button().unwrap();
        let outcome = app.add_new_button().unwrap();

        assert_eq!(outcome, Outcome::Ignored(Ignored::DuplicateLabel));
        assert_eq!(app.state().custom_buttons.len(), 1);
    }

    #[test]
    fn test_add_duplicate_custom_label_allowed_by_policy() {
        let storage = Storage::open_in_memory().unwrap();
        let prompter = ScriptedPrompter::new().answer("swim").answer("swim");
        let mut app =
            ActivityLogger::initialize(storage, prompter, DuplicatePolicy::Allow).unwrap();

        app.add_new_button().unwrap();
        app.add_new_button().unwrap();

        assert_eq!(app.state().custom_buttons.len(), 2);
    }

    #[test]
    fn test_state_survives_reinitialize() {
        let storage = Storage::open_in_memory().unwrap();
        let prompter = ScriptedPrompter::always_confirm().answer("swim");
        let mut app =
            ActivityLogger::initialize(storage, prompter, DuplicatePolicy::Reject).unwrap();
        app.add_new_button().unwrap();
        app.tap("swim").unwrap();
        app.toggle_delete_mode();
        app.tap("breakfast").unwrap();
        app.toggle_delete_mode();
        let expected = app.state().clone();

        let storage = app.storage;
        let again =
            ActivityLogger::initialize(storage, ScriptedPrompter::new(), DuplicatePolicy::Reject)
                .unwrap();

        assert_eq!(again.state().log, expected.log);
        assert_eq!(again.state().custom_buttons, expected.custom_buttons);
        assert_eq!(
            again.state().deleted_default_buttons,
            expected.deleted_default_buttons
        );
        assert!(!again.delete_mode());
        assert!(expected.delete_mode);
    }

    #[test]
    fn test_persist_touches_only_changed_key() {
        let mut app = logger(ScriptedPrompter::new());
        app.log_event("lunch").unwrap();

        assert_eq!(
            app.storage().keys().unwrap(),
            vec![StorageKey::ActivityLog.as_str().to_string()]
        );
    }
}
