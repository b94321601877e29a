use anyhow::Result;
use async_trait::async_trait;
use designer_types::Attachment;

/// Remote design assistant chat service
///
/// The transport is opaque to the caller. Any error is treated as a failed exchange;
/// no structured payload is required.
#[async_trait]
pub trait DesignClient: Send + Sync {
    /// Send one request and wait for the reply text
    async fn send_design_request(&self, request: DesignRequest) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignRequest {
    pub message: String,
    pub attachments: Vec<Attachment>,
}

impl DesignRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}
