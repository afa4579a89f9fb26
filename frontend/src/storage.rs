use callwatch_shared::session::{TokenStore, TokenStoreError};
use gloo_storage::{LocalStorage, Storage};

/// Keeps the bearer token in `localStorage` under a configured key.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserTokenStore {
    key: String,
}

impl BrowserTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::get::<String>(&self.key).ok()
    }

    fn save(&mut self, token: &str) -> Result<(), TokenStoreError> {
        LocalStorage::set(&self.key, token).map_err(|e| TokenStoreError(e.to_string()))
    }

    fn clear(&mut self) {
        LocalStorage::delete(&self.key);
    }
}
