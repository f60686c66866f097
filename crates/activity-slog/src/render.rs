//! Text and JSON views of the button grid and the log.
//!
//! Positions shown to the user are 1-based; position 1 in the log listing is
//! the newest entry (display index 0).

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::model::{ButtonConfig, LogEntry};
use crate::state::{AppState, Ignored, Outcome};

/// Time zone used when showing dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// The machine's local time zone.
    #[default]
    Local,
    /// Coordinated universal time.
    Utc,
}

impl Clock {
    /// Pick a clock from the `display.utc` setting.
    #[must_use]
    pub fn from_utc_flag(utc: bool) -> Self {
        if utc {
            Self::Utc
        } else {
            Self::Local
        }
    }

    /// Format `ts` as `Weekday, M/D/YYYY` in this clock's zone.
    #[must_use]
    pub fn format_date(self, ts: &DateTime<Utc>) -> String {
        match self {
            Self::Local => format_date_in(ts, &Local),
            Self::Utc => format_date_in(ts, &Utc),
        }
    }
}

/// Format `ts` as `Weekday, M/D/YYYY` in `tz`.
#[must_use]
pub fn format_date_in<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.with_timezone(tz).format("%A, %-m/%-d/%Y").to_string()
}

/// The button grid with the add and delete-mode controls.
#[must_use]
pub fn buttons_text(buttons: &[ButtonConfig], delete_mode: bool) -> String {
    let width = buttons.len().to_string().len();
    let toggle = if delete_mode {
        "cancel delete"
    } else {
        "delete an activity"
    };

    let header = delete_mode.then(|| "Delete mode: pick a button to remove".to_string());
    let rows = buttons
        .iter()
        .enumerate()
        .map(|(i, button)| format!("  {:>width$}. {}", i + 1, button.text));
    let controls = [
        format!("  {:>width$}  add activity", "+"),
        format!("  {:>width$}  {toggle}", "d"),
    ];

    header
        .into_iter()
        .chain(rows)
        .chain(controls)
        .map(|line| line + "\n")
        .collect()
}

/// The log, newest first, optionally capped at `limit` entries.
#[must_use]
pub fn log_text(state: &AppState, clock: Clock, limit: Option<usize>) -> String {
    if state.log.is_empty() {
        return "No activities logged yet.\n".to_string();
    }

    let shown = limit.unwrap_or(usize::MAX).min(state.log.len());
    let width = shown.to_string().len();
    let mut out: String = state
        .log_newest_first()
        .take(shown)
        .map(|(index, entry)| {
            format!(
                "  #{:<width$}  {}  {}\n",
                index + 1,
                clock.format_date(&entry.timestamp),
                entry.event
            )
        })
        .collect();
    if shown < state.log.len() {
        out.push_str(&format!("  ... {} older entries\n", state.log.len() - shown));
    }
    out
}

/// A one-line description of what an operation did.
#[must_use]
pub fn outcome_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Logged(entry) => format!("Logged \"{}\".", entry.event),
        Outcome::DeleteModeToggled(true) => "Delete mode on: pick a button to remove.".to_string(),
        Outcome::DeleteModeToggled(false) => "Delete mode off.".to_string(),
        Outcome::LogEntryDeleted(entry) => format!("Deleted log entry \"{}\".", entry.event),
        Outcome::DefaultHidden(label) | Outcome::CustomRemoved(label) => {
            format!("Removed button \"{label}\".")
        }
        Outcome::DefaultRestored {
            label,
            was_hidden: true,
        } => format!("Restored button \"{label}\"."),
        Outcome::DefaultRestored {
            label,
            was_hidden: false,
        } => format!("\"{label}\" is already on the grid."),
        Outcome::CustomAdded(label) => format!("Added button \"{label}\"."),
        Outcome::Ignored(Ignored::DuplicateLabel) => {
            "A button with that label already exists.".to_string()
        }
        Outcome::Ignored(reason) => format!("Nothing changed ({reason})."),
    }
}

#[derive(Serialize)]
struct LogRow<'a> {
    position: usize,
    date: String,
    #[serde(flatten)]
    entry: &'a LogEntry,
}

/// The button grid as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn buttons_json(buttons: &[ButtonConfig]) -> Result<String> {
    Ok(serde_json::to_string_pretty(buttons)?)
}

/// The log as a JSON array, newest first.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn log_json(state: &AppState, clock: Clock, limit: Option<usize>) -> Result<String> {
    let rows: Vec<LogRow<'_>> = state
        .log_newest_first()
        .take(limit.unwrap_or(usize::MAX))
        .map(|(index, entry)| LogRow {
            position: index + 1,
            date: clock.format_date(&entry.timestamp),
            entry,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn state_with(entries: &[(&str, DateTime<Utc>)]) -> AppState {
        AppState {
            log: entries
                .iter()
                .map(|(event, at)| LogEntry::at(*event, *at))
                .collect(),
            ..AppState::default()
        }
    }

    #[test]
    fn test_format_date_utc() {
        assert_eq!(
            Clock::Utc.format_date(&ts(2024, 1, 15, 12)),
            "Monday, 1/15/2024"
        );
        assert_eq!(
            Clock::Utc.format_date(&ts(2026, 10, 19, 0)),
            "Monday, 10/19/2026"
        );
    }

    #[test]
    fn test_format_date_follows_zone() {
        let late = ts(2024, 1, 15, 23);
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        assert_eq!(format_date_in(&late, &Utc), "Monday, 1/15/2024");
        assert_eq!(format_date_in(&late, &tokyo), "Tuesday, 1/16/2024");
    }

    #[test]
    fn test_clock_from_flag() {
        assert_eq!(Clock::from_utc_flag(true), Clock::Utc);
        assert_eq!(Clock::from_utc_flag(false), Clock::Local);
        assert_eq!(Clock::default(), Clock::Local);
    }

    #[test]
    fn test_buttons_text() {
        let buttons = vec![ButtonConfig::default_button("lunch"), ButtonConfig::custom("swim")];

        let text = buttons_text(&buttons, false);

        assert_eq!(
            text,
            "  1. lunch\n  2. swim\n  +  add activity\n  d  delete an activity\n"
        );
    }

    #[test]
    fn test_buttons_text_delete_mode() {
        let text = buttons_text(&[ButtonConfig::custom("swim")], true);

        assert_eq!(
            text,
            "Delete mode: pick a button to remove\n  1. swim\n  +  add activity\n  d  cancel delete\n"
        );
    }

    #[test]
    fn test_buttons_text_pads_positions() {
        let buttons: Vec<ButtonConfig> = (1..=10)
            .map(|i| ButtonConfig::custom(format!("b{i}")))
            .collect();

        let text = buttons_text(&buttons, false);

        assert!(text.starts_with("   1. b1\n"));
        assert!(text.contains("  10. b10\n"));
        assert!(text.ends_with("   +  add activity\n   d  delete an activity\n"));
    }

    #[test]
    fn test_log_text_newest_first() {
        let state = state_with(&[("breakfast", ts(2024, 1, 15, 8)), ("lunch", ts(2024, 1, 16, 12))]);

        let text = log_text(&state, Clock::Utc, None);

        assert_eq!(
            text,
            "  #1  Tuesday, 1/16/2024  lunch\n  #2  Monday, 1/15/2024  breakfast\n"
        );
    }

    #[test]
    fn test_log_text_empty() {
        assert_eq!(
            log_text(&AppState::default(), Clock::Utc, None),
            "No activities logged yet.\n"
        );
    }

    #[test]
    fn test_log_text_limit() {
        let start = ts(2024, 1, 1, 8);
        let entries: Vec<(&str, DateTime<Utc>)> = (0..5)
            .map(|i| ("walk 1 mile", start + Duration::days(i)))
            .collect();
        let state = state_with(&entries);

        let text = log_text(&state, Clock::Utc, Some(2));

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Friday, 1/5/2024"));
        assert!(text.contains("... 3 older entries"));
    }

    #[test]
    fn test_outcome_text() {
        let entry = LogEntry::at("lunch", ts(2024, 1, 15, 12));
        assert_eq!(outcome_text(&Outcome::Logged(entry)), "Logged \"lunch\".");
        assert_eq!(
            outcome_text(&Outcome::DefaultHidden("dinner".to_string())),
            "Removed button \"dinner\"."
        );
        assert_eq!(
            outcome_text(&Outcome::DefaultRestored {
                label: "lunch".to_string(),
                was_hidden: false,
            }),
            "\"lunch\" is already on the grid."
        );
        assert_eq!(
            outcome_text(&Outcome::Ignored(Ignored::Declined)),
            "Nothing changed (not confirmed)."
        );
    }

    #[test]
    fn test_buttons_json() {
        let json = buttons_json(&[ButtonConfig::default_button("lunch")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["text"], "lunch");
        assert_eq!(value[0]["isDefault"], true);
    }

    #[test]
    fn test_log_json() {
        let state = state_with(&[("breakfast", ts(2024, 1, 15, 8)), ("lunch", ts(2024, 1, 15, 12))]);

        let json = log_json(&state, Clock::Utc, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["position"], 1);
        assert_eq!(value[0]["event"], "lunch");
        assert_eq!(value[0]["timestamp"], "2024-01-15T12:00:00.000Z");
        assert_eq!(value[1]["date"], "Monday, 1/15/2024");
    }
}
