//! Local Preference Store
//!
//! Small advisory UI state (recent cases/tools, access token) behind an injectable
//! key-value backend. Content may vanish at any time; unreadable entries read as empty.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

pub const RECENT_CASES_KEY: &str = "litdocket.recent_cases";
pub const RECENT_TOOLS_KEY: &str = "litdocket.recent_tools";
pub const ACCESS_TOKEN_KEY: &str = "litdocket.access_token";

/// String key-value backing storage (browser localStorage in production)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> DomainResult<()>;
    fn remove(&self, key: &str);
}

/// In-memory backend for tests and for browsers with storage disabled
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub visited_at_ms: u64,
}

/// Most-recent-first list, de-duplicated by id and capped
pub struct RecentItems<S> {
    store: S,
    key: String,
    capacity: usize,
}

impl<S: KeyValueStore> RecentItems<S> {
    pub fn new(store: S, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            store,
            key: key.into(),
            capacity: capacity.max(1),
        }
    }

    pub fn list(&self) -> Vec<RecentEntry> {
        let Some(raw) = self.store.get(&self.key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<RecentEntry>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(self.capacity);
                entries
            }
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "discarding unreadable recent items");
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[RecentEntry]) -> DomainResult<()> {
        let json = serde_json::to_string(entries).map_err(|e| DomainError::Internal(e.to_string()))?;
        self.store.set(&self.key, &json)
    }

    /// Move (or insert) the entry to the front
    pub fn touch(&self, entry: RecentEntry) -> DomainResult<Vec<RecentEntry>> {
        let mut entries = self.list();
        entries.retain(|e| e.id != entry.id);
        entries.insert(0, entry);
        entries.truncate(self.capacity);
        self.save(&entries)?;
        Ok(entries)
    }

    pub fn forget(&self, id: &str) -> DomainResult<Vec<RecentEntry>> {
        let mut entries = self.list();
        entries.retain(|e| e.id != id);
        self.save(&entries)?;
        Ok(entries)
    }

    pub fn clear(&self) {
        self.store.remove(&self.key);
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Bearer token slot
pub struct TokenStore<S> {
    store: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Blank tokens read as absent
    pub fn token(&self) -> Option<String> {
        self.store
            .get(ACCESS_TOKEN_KEY)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    pub fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
    }
}
