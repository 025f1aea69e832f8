use shared::{KeyValueStore, StorageError};
use tracing::warn;

/// `window.localStorage`, or nothing when the browser refuses access (for
/// example in some private browsing modes). Reads then fail with
/// `StorageError::Unavailable`, which the store treats as an empty list.
#[derive(Debug, Clone, Default)]
pub struct BrowserStorage {
    inner: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let inner = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if inner.is_none() {
            warn!("localStorage is unavailable, tasks will not be saved");
        }
        Self { inner }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.inner.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|err| StorageError::Read(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.inner.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| StorageError::Write(format!("{err:?}")))
    }
}
