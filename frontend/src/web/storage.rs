//! LocalStorage-backed session backend.

use campus::session::{KeyValueStore, SessionError};

/// Raw string access to `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let storage = Self::storage().ok_or(SessionError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| SessionError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
