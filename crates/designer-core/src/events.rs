use designer_types::Message;
use serde::Serialize;

use crate::exchange::ExchangeState;

/// Progress notifications for a spawned exchange
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExchangeEvent {
    /// User message and placeholder are in the thread; the remote call is running
    Submitted {
        exchange_id: String,
        thread_id: String,
    },

    /// The placeholder has been replaced
    Settled {
        exchange_id: String,
        thread_id: String,
        state: ExchangeState,
        message: Message,
    },
}

impl ExchangeEvent {
    pub fn thread_id(&self) -> &str {
        match self {
            Self::Submitted { thread_id, .. } | Self::Settled { thread_id, .. } => thread_id,
        }
    }
}
