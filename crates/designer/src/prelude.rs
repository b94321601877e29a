//! Commonly used types

pub use crate::{
    init_logging, Attachment, AwaitPolicy, DesignClient, DesignRequest, Designer,
    DesignerBuilder, DesignerConfig, ExchangeEvent, ExchangeState, InMemoryStorage,
    JsonFileStorage, Message, Role, StorageBackend, Theme, Thread, ThreadSummary,
};
