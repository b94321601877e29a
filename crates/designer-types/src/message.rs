use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::templates::{FAILURE_NOTICE, THINKING_PLACEHOLDER};

/// Author of a message. Exactly one tag per message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Role::System)
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Role::User)
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Role::Assistant)
    }
}

/// One entry of a thread's log.
///
/// Messages have no identity beyond their position in the thread. `content` may
/// carry inline markup (bold, italic, code spans, line breaks); interpreting it is
/// left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            attachments: Vec::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn user_with_attachments(content: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            attachments,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// The "thinking" marker appended while a reply is awaited
    pub fn placeholder() -> Self {
        Self::system(THINKING_PLACEHOLDER)
    }

    /// Terminal message for a failed exchange
    pub fn failure_notice() -> Self {
        Self::system(FAILURE_NOTICE)
    }

    pub fn is_placeholder(&self) -> bool {
        self.role.is_system() && self.content == THINKING_PLACEHOLDER
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}
