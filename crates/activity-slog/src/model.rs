//! Core activity types.
//!
//! Log entries and button definitions, plus the label ordering used by the
//! button grid. The serde shapes here are the stored wire format.

use std::cmp::Ordering;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// The built-in activity labels, in their canonical order.
pub const DEFAULT_BUTTONS: [&str; 10] = [
    "run 1 mile",
    "run 2 miles",
    "run 3 miles",
    "walk 1 mile",
    "walk 2 miles",
    "walk 3 miles",
    "stretch 5 minutes",
    "breakfast",
    "lunch",
    "dinner",
];

/// Check whether `label` is one of the built-in labels.
#[must_use]
pub fn is_default_label(label: &str) -> bool {
    DEFAULT_BUTTONS.contains(&label)
}

/// A single logged activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// The label of the button that was tapped.
    pub event: String,

    /// When the button was tapped.
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Create an entry for `event` stamped with the current time.
    #[must_use]
    pub fn now(event: impl Into<String>) -> Self {
        Self::at(event, Utc::now())
    }

    /// Create an entry for `event` with an explicit timestamp.
    ///
    /// The timestamp is truncated to milliseconds, the precision it is
    /// stored with, so a reloaded entry equals the one held in memory.
    #[must_use]
    pub fn at(event: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            event: event.into(),
            timestamp: timestamp.trunc_subsecs(3),
        }
    }
}

/// A button on the activity grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonConfig {
    /// The label shown on the button and recorded when tapped.
    pub text: String,

    /// Whether this is one of [`DEFAULT_BUTTONS`].
    #[serde(
        rename = "isDefault",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub is_default: bool,
}

impl ButtonConfig {
    /// A built-in button.
    #[must_use]
    pub fn default_button(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_default: true,
        }
    }

    /// A user-added button.
    #[must_use]
    pub fn custom(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_default: false,
        }
    }
}

/// Compare two labels the way a human-facing, locale-aware sort would.
///
/// Labels are compared case-insensitively first. When they only differ by
/// case, the lowercase form sorts first. Any remaining tie is broken by
/// plain byte order so the result is total.
#[must_use]
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if folded != Ordering::Equal {
        return folded;
    }

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            return match (ca.is_lowercase(), cb.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => ca.cmp(&cb),
            };
        }
    }
    a.cmp(b)
}

/// Millisecond-precision ISO-8601 timestamps with a `Z` suffix.
///
/// Any RFC 3339 offset is accepted when reading.
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_buttons_are_unique() {
        for (i, a) in DEFAULT_BUTTONS.iter().enumerate() {
            for b in &DEFAULT_BUTTONS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_is_default_label() {
        assert!(is_default_label("lunch"));
        assert!(is_default_label("run 1 mile"));
        assert!(!is_default_label("Lunch"));
        assert!(!is_default_label("lunch "));
        assert!(!is_default_label("swim"));
    }

    #[test]
    fn test_log_entry_wire_format() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap();
        let entry = LogEntry::at("lunch", ts);

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"event":"lunch","timestamp":"2024-01-15T12:30:00.000Z"}"#
        );
    }

    #[test]
    fn test_log_entry_now_survives_storage_format() {
        let entry = LogEntry::now("lunch");

        let json = serde_json::to_string(&entry).unwrap();
        let back: LogEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(back, entry);
        assert_eq!(entry.timestamp.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_log_entry_truncates_to_millis() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);

        let entry = LogEntry::at("lunch", ts);

        assert_eq!(entry.timestamp.timestamp_subsec_millis(), 123);
        assert_eq!(entry.timestamp.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_log_entry_reads_offset_timestamps() {
        let json = r#"{"event":"dinner","timestamp":"2024-01-15T20:00:00+02:00"}"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.event, "dinner");
        assert_eq!(
            entry.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_log_entry_rejects_bad_timestamp() {
        let json = r#"{"event":"dinner","timestamp":"yesterday"}"#;
        assert!(serde_json::from_str::<LogEntry>(json).is_err());
    }

    #[test]
    fn test_custom_button_omits_is_default() {
        let json = serde_json::to_string(&ButtonConfig::custom("swim")).unwrap();
        assert_eq!(json, r#"{"text":"swim"}"#);
    }

    #[test]
    fn test_button_is_default_optional_on_read() {
        let bare: ButtonConfig = serde_json::from_str(r#"{"text":"swim"}"#).unwrap();
        assert!(!bare.is_default);

        let tagged: ButtonConfig =
            serde_json::from_str(r#"{"text":"lunch","isDefault":true}"#).unwrap();
        assert!(tagged.is_default);
    }

    #[test]
    fn test_compare_labels_case_insensitive() {
        assert_eq!(compare_labels("Breakfast", "dinner"), Ordering::Less);
        assert_eq!(compare_labels("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_labels("zebra", "Apple"), Ordering::Greater);
    }

    #[test]
    fn test_compare_labels_lowercase_first_on_tie() {
        assert_eq!(compare_labels("yoga", "Yoga"), Ordering::Less);
        assert_eq!(compare_labels("Yoga", "yoga"), Ordering::Greater);
        assert_eq!(compare_labels("yoga", "yoga"), Ordering::Equal);
    }

    #[test]
    fn test_compare_labels_prefix() {
        assert_eq!(compare_labels("run", "run 1 mile"), Ordering::Less);
        assert_eq!(compare_labels("run 1 mile", "run 2 miles"), Ordering::Less);
    }
}
