//! Mapping between [`AppState`] and the key-value store.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::Result;
use crate::state::{AppState, StorageKey};

use super::Storage;

impl Storage {
    /// Load all persisted collections into a fresh state.
    ///
    /// A missing key yields an empty collection. A value that does not parse
    /// is logged as a warning and also yields an empty collection; the other
    /// keys still load. Delete mode always starts disarmed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database itself cannot be read.
    pub fn load_state(&self) -> Result<AppState> {
        Ok(AppState {
            log: self.load_collection(StorageKey::ActivityLog)?,
            custom_buttons: self.load_collection(StorageKey::CustomButtons)?,
            deleted_default_buttons: self.load_collection(StorageKey::DeletedDefaultButtons)?,
            delete_mode: false,
        })
    }

    /// Load one collection, falling back to empty when absent or malformed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database itself cannot be read.
    pub fn load_collection<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Vec<T>> {
        let Some(raw) = self.get(key.as_str())? else {
            debug!("No stored value for {}", key);
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("Ignoring malformed value stored under {}: {}", key, e);
                Ok(Vec::new())
            }
        }
    }

    /// Write the collection named by `key` from `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn persist(&self, state: &AppState, key: StorageKey) -> Result<()> {
        let value = match key {
            StorageKey::ActivityLog => serde_json::to_string(&state.log)?,
            StorageKey::CustomButtons => serde_json::to_string(&state.custom_buttons)?,
            StorageKey::DeletedDefaultButtons => {
                serde_json::to_string(&state.deleted_default_buttons)?
            }
        };
        self.set(key.as_str(), &value)
    }
}
