//! `activity-slog` - A tap-to-log personal activity tracker
//!
//! This library keeps a grid of activity buttons (built-in defaults plus
//! user-added ones) and a timestamped log of taps, persisted as JSON values in
//! a small `SQLite` key-value store.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod render;
pub mod session;
pub mod state;
pub mod storage;

pub use app::ActivityLogger;
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{ButtonConfig, LogEntry, DEFAULT_BUTTONS};
pub use prompt::{Console, Prompter, ScriptedPrompter};
pub use state::{Action, AppState, DuplicatePolicy, Outcome, StorageKey};
pub use storage::{Storage, StorageStats};
