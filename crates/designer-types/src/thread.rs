use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::templates::{new_thread_welcome, DEFAULT_THREAD_ID, DEFAULT_THREAD_NAME, DEFAULT_WELCOME};

const PREVIEW_CHARS: usize = 30;
const EMPTY_PREVIEW: &str = "New conversation";

/// A named conversation with its own ordered message log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Thread {
    /// Create a thread seeded with its welcome message
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            messages: vec![Message::system(new_thread_welcome(&name))],
            name,
        }
    }

    /// The primordial thread present in every collection
    pub fn seeded_default() -> Self {
        Self {
            id: DEFAULT_THREAD_ID.to_string(),
            name: DEFAULT_THREAD_NAME.to_string(),
            messages: vec![Message::system(DEFAULT_WELCOME)],
        }
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_THREAD_ID
    }

    /// Welcome message this thread would have been seeded with
    pub fn welcome(&self) -> Message {
        if self.is_default() {
            Message::system(DEFAULT_WELCOME)
        } else {
            Message::system(new_thread_welcome(&self.name))
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Short sidebar preview of the latest activity
    pub fn preview(&self) -> String {
        match self.messages.last() {
            Some(last) if self.messages.len() > 1 => {
                let head: String = last.content.chars().take(PREVIEW_CHARS).collect();
                format!("{}...", head)
            }
            _ => EMPTY_PREVIEW.to_string(),
        }
    }
}

/// Read-only projection of a thread for list views
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadSummary {
    pub id: String,
    pub name: String,
    pub preview: String,
    pub is_active: bool,
    pub deletable: bool,
}

impl ThreadSummary {
    pub fn from_thread(thread: &Thread, active_id: &str) -> Self {
        Self {
            id: thread.id.clone(),
            name: thread.name.clone(),
            preview: thread.preview(),
            is_active: thread.id == active_id,
            deletable: !thread.is_default(),
        }
    }
}
