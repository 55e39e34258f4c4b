//! `localStorage` binding for the game's durable store.
use geocoin_game::DurableStore;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::dom::{js_error_message, window};

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("no browser window available")]
    NoWindow,
    #[error("localStorage is disabled")]
    Unavailable,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<JsValue> for WebStorageError {
    fn from(value: JsValue) -> Self {
        Self::Storage(js_error_message(&value))
    }
}

/// The browser's `localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// # Errors
    ///
    /// Returns an error outside a browser or when storage access is blocked.
    pub fn open() -> Result<Self, WebStorageError> {
        let window = window().ok_or(WebStorageError::NoWindow)?;
        let storage = window.local_storage()?.ok_or(WebStorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl DurableStore for LocalStore {
    type Error = WebStorageError;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.storage.get_item(key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Ok(self.storage.set_item(key, value)?)
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        Ok(self.storage.remove_item(key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_read_cleanly() {
        assert_eq!(
            WebStorageError::Storage("QuotaExceededError".into()).to_string(),
            "storage error: QuotaExceededError"
        );
        assert_eq!(
            WebStorageError::Unavailable.to_string(),
            "localStorage is disabled"
        );
    }
}
