//! Browser Storage
//!
//! `localStorage` behind the `KeyValueStore` seam. Every call tolerates a missing or
//! disabled storage area; the content is advisory.

use docket_core::domain::{DomainError, DomainResult};
use docket_core::recent::{KeyValueStore, RecentItems, TokenStore, RECENT_CASES_KEY, RECENT_TOOLS_KEY};

use crate::config::app_config;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let storage = self
            .storage()
            .ok_or_else(|| DomainError::Internal("localStorage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| DomainError::Internal(format!("localStorage write failed: {:?}", e)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}

pub fn recent_cases() -> RecentItems<LocalStorageStore> {
    RecentItems::new(LocalStorageStore, RECENT_CASES_KEY, app_config().recent.capacity)
}

pub fn recent_tools() -> RecentItems<LocalStorageStore> {
    RecentItems::new(LocalStorageStore, RECENT_TOOLS_KEY, app_config().recent.capacity)
}

pub fn token_store() -> TokenStore<LocalStorageStore> {
    TokenStore::new(LocalStorageStore)
}
