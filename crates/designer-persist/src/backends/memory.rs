use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::StorageBackend;
use crate::error::Result;

/// In-memory storage backend
/// Useful for testing and ephemeral sessions; clones share the same entries
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys written so far, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl StorageBackend for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
