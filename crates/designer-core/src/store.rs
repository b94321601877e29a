use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use designer_persist::Persistence;
use designer_types::{
    Message, Thread, ThreadSummary, DEFAULT_THREAD_ID, FALLBACK_THREAD_TITLE,
};
use parking_lot::Mutex;

/// Store shared between command handlers and in-flight exchanges.
///
/// Every store operation runs under the lock as one synchronous step.
pub type SharedThreadStore = Arc<Mutex<ThreadStore>>;

/// Owner of the thread collection and the active-thread pointer
///
/// Every mutation is written through to the persistence adapter before returning.
/// Rejected commands (unknown ids, empty names, deleting the default thread) are
/// silent no-ops that report `false`/`None`.
pub struct ThreadStore {
    threads: Vec<Thread>,
    active_id: String,
    persistence: Persistence,
}

impl ThreadStore {
    /// Load the persisted snapshot, repairing it if it breaks the collection invariants
    pub fn open(persistence: Persistence) -> Self {
        let (threads, repaired) = normalize(persistence.load_threads());
        let store = Self {
            threads,
            active_id: DEFAULT_THREAD_ID.to_string(),
            persistence,
        };
        if repaired {
            store.persist();
        }
        tracing::info!(threads = store.threads.len(), "Thread store opened");
        store
    }

    pub fn into_shared(self) -> SharedThreadStore {
        Arc::new(Mutex::new(self))
    }

    /// Create a thread, make it active and return its id
    pub fn create_thread(&mut self, name: &str) -> Option<String> {
        if name.trim().is_empty() {
            tracing::debug!("Rejected thread with empty name");
            return None;
        }

        let id = self.allocate_id();
        self.threads.push(Thread::new(id.clone(), name));
        self.active_id = id.clone();
        self.persist();

        tracing::info!(thread_id = %id, name, "Thread created");
        Some(id)
    }

    /// Remove a thread once `confirm` approves it
    ///
    /// The default thread is never offered for confirmation. If the removed thread
    /// was active, the default thread becomes active.
    pub fn delete_thread<F>(&mut self, thread_id: &str, confirm: F) -> bool
    where
        F: FnOnce(&Thread) -> bool,
    {
        if thread_id == DEFAULT_THREAD_ID {
            tracing::debug!("Refused to delete the default thread");
            return false;
        }
        let Some(index) = self.position(thread_id) else {
            return false;
        };
        if !confirm(&self.threads[index]) {
            tracing::debug!(thread_id, "Thread deletion not confirmed");
            return false;
        }

        self.threads.remove(index);
        if self.active_id == thread_id {
            self.active_id = DEFAULT_THREAD_ID.to_string();
        }
        self.persist();

        tracing::info!(thread_id, "Thread deleted");
        true
    }

    pub fn select_thread(&mut self, thread_id: &str) -> bool {
        if self.position(thread_id).is_none() {
            tracing::debug!(thread_id, "Ignored selection of unknown thread");
            return false;
        }
        self.active_id = thread_id.to_string();
        true
    }

    pub fn append_message(&mut self, thread_id: &str, message: Message) -> bool {
        let Some(thread) = self.thread_mut(thread_id) else {
            return false;
        };
        tracing::debug!(thread_id, role = message.role.as_str(), "Message appended");
        thread.messages.push(message);
        self.persist();
        true
    }

    /// Append a user message and its placeholder in a single step
    pub fn append_exchange(&mut self, thread_id: &str, user: Message, placeholder: Message) -> bool {
        let Some(thread) = self.thread_mut(thread_id) else {
            return false;
        };
        thread.messages.push(user);
        thread.messages.push(placeholder);
        self.persist();

        tracing::debug!(thread_id, "Exchange appended");
        true
    }

    /// Overwrite the last message in place
    pub fn replace_last_message(&mut self, thread_id: &str, message: Message) -> bool {
        let Some(slot) = self.thread_mut(thread_id).and_then(|t| t.messages.last_mut()) else {
            return false;
        };
        *slot = message;
        self.persist();
        true
    }

    /// Turn the most recent placeholder of a thread into `message`
    ///
    /// Usually the placeholder is the last entry. Messages appended after it (an
    /// upload while awaiting) stay where they are and the placeholder slot itself
    /// is overwritten.
    pub fn settle_placeholder(&mut self, thread_id: &str, message: Message) -> bool {
        let Some(thread) = self.thread_mut(thread_id) else {
            return false;
        };
        let Some(index) = thread.messages.iter().rposition(Message::is_placeholder) else {
            tracing::warn!(thread_id, "No placeholder to settle");
            return false;
        };

        thread.messages[index] = message;
        self.persist();
        true
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn thread(&self, thread_id: &str) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == thread_id)
    }

    pub fn active_thread_id(&self) -> &str {
        &self.active_id
    }

    pub fn active_thread(&self) -> Option<&Thread> {
        self.thread(&self.active_id)
    }

    pub fn active_thread_name(&self) -> &str {
        self.active_thread()
            .map(|t| t.name.as_str())
            .unwrap_or(FALLBACK_THREAD_TITLE)
    }

    /// Messages of the active thread, empty if the pointer is stale
    pub fn active_messages(&self) -> &[Message] {
        self.active_thread()
            .map(|t| t.messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn summaries(&self) -> Vec<ThreadSummary> {
        self.threads
            .iter()
            .map(|t| ThreadSummary::from_thread(t, &self.active_id))
            .collect()
    }

    fn position(&self, thread_id: &str) -> Option<usize> {
        self.threads.iter().position(|t| t.id == thread_id)
    }

    fn thread_mut(&mut self, thread_id: &str) -> Option<&mut Thread> {
        self.threads.iter_mut().find(|t| t.id == thread_id)
    }

    /// Millisecond timestamp, bumped until it is unused
    fn allocate_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.position(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save_threads(&self.threads) {
            tracing::error!(error = %e, "Failed to persist threads");
        }
    }
}

/// Enforce the collection invariants on a loaded snapshot
fn normalize(loaded: Vec<Thread>) -> (Vec<Thread>, bool) {
    let mut repaired = false;
    let mut seen = HashSet::new();
    let mut threads = Vec::with_capacity(loaded.len() + 1);

    for mut thread in loaded {
        if !seen.insert(thread.id.clone()) {
            tracing::warn!(thread_id = %thread.id, "Dropping thread with duplicate id");
            repaired = true;
            continue;
        }
        if thread.messages.is_empty() {
            tracing::warn!(thread_id = %thread.id, "Re-seeding thread without messages");
            thread.messages.push(thread.welcome());
            repaired = true;
        }
        let stale = settle_stale_placeholders(&mut thread);
        if stale > 0 {
            tracing::warn!(
                thread_id = %thread.id,
                stale,
                "Settling placeholders left by an interrupted exchange"
            );
            repaired = true;
        }
        threads.push(thread);
    }

    if !seen.contains(DEFAULT_THREAD_ID) {
        tracing::warn!("Default thread missing from snapshot, re-seeding");
        threads.insert(0, Thread::seeded_default());
        repaired = true;
    }

    (threads, repaired)
}

/// No exchange is in flight when a snapshot is loaded, so any placeholder is stale
fn settle_stale_placeholders(thread: &mut Thread) -> usize {
    let mut stale = 0;
    for message in thread.messages.iter_mut().filter(|m| m.is_placeholder()) {
        *message = Message::failure_notice();
        stale += 1;
    }
    stale
}
