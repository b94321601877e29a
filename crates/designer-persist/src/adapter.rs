use std::sync::Arc;

use designer_types::{Theme, Thread};
use serde::{Deserialize, Serialize};

use crate::backend::StorageBackend;
use crate::error::Result;

pub const DEFAULT_THREADS_KEY: &str = "chatThreads";
pub const DEFAULT_THEME_KEY: &str = "theme";

/// Well-known keys of the two persisted slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    pub threads: String,
    pub theme: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS_KEY.to_string(),
            theme: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

/// Mirrors the thread collection and the theme preference into a storage backend
///
/// Reads never fail: an absent, unreadable or unparsable slot yields the documented
/// default. Writes overwrite unconditionally and report backend errors to the caller.
#[derive(Clone)]
pub struct Persistence {
    backend: Arc<dyn StorageBackend>,
    keys: StorageKeys,
}

impl Persistence {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            keys: StorageKeys::default(),
        }
    }

    pub fn with_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Stored collection, or `None` when the slot was never written
    pub fn try_load_threads(&self) -> Result<Option<Vec<Thread>>> {
        match self.backend.get(&self.keys.threads)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Stored collection, falling back to the single seeded default thread
    pub fn load_threads(&self) -> Vec<Thread> {
        match self.try_load_threads() {
            Ok(Some(threads)) => threads,
            Ok(None) => {
                tracing::debug!(key = %self.keys.threads, "No stored threads, seeding default");
                vec![Thread::seeded_default()]
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.keys.threads,
                    error = %e,
                    "Stored threads unreadable, falling back to default"
                );
                vec![Thread::seeded_default()]
            }
        }
    }

    pub fn save_threads(&self, threads: &[Thread]) -> Result<()> {
        let raw = serde_json::to_string(threads)?;
        self.backend.set(&self.keys.threads, &raw)
    }

    /// Stored theme, falling back to `system_default`
    pub fn load_theme(&self, system_default: Theme) -> Theme {
        match self.backend.get(&self.keys.theme) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(key = %self.keys.theme, value = %raw, "Unknown stored theme");
                system_default
            }),
            Ok(None) => system_default,
            Err(e) => {
                tracing::warn!(key = %self.keys.theme, error = %e, "Stored theme unreadable");
                system_default
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.backend.set(&self.keys.theme, theme.as_str())
    }
}
