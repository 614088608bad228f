//! Key-value storage substrate.
//!
//! The favorites and recently-viewed lists persist through this trait.
//! It deliberately mirrors a browser-local store: string keys, string
//! values, synchronous access, and no way to fail loudly — callers
//! degrade to defaults when an entry is absent or unreadable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Browser-like persistent key-value storage.
pub trait KeyValueStorage: Send + Sync {
    /// Read a value, `None` when the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str);
}

/// In-memory storage.
///
/// Cloning yields a handle to the same underlying map, matching how
/// every component of a page sees one shared local store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries, for tests that start
    /// from persisted state.
    #[must_use]
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: Arc::new(Mutex::new(entries.into_iter().collect())),
        }
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}
