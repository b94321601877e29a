//! # Designer
//!
//! Threaded, persisted chat core for a design assistant front-end.
//!
//! ## Overview
//!
//! A user exchanges natural-language requests and image attachments with a remote
//! chat service. This crate owns everything between the UI event handlers and that
//! service:
//!
//! - **Threads**: several named conversations, one of them active
//! - **Optimistic exchanges**: the user message and a "thinking" placeholder appear
//!   at once; the placeholder is replaced in place by the reply or a failure notice
//! - **Persistence**: every mutation is written through to a key-value backend
//! - **Theme**: a persisted dark/light preference
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use designer::prelude::*;
//! use std::sync::Arc;
//!
//! struct Backend;
//!
//! #[async_trait::async_trait]
//! impl DesignClient for Backend {
//!     async fn send_design_request(&self, request: DesignRequest) -> anyhow::Result<String> {
//!         Ok(format!("Working on: {}", request.message))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DesignerConfig::load()?;
//!     init_logging(&config.logging);
//!
//!     let mut designer = DesignerBuilder::new()
//!         .config(config)
//!         .client(Arc::new(Backend))
//!         .build()?;
//!
//!     designer.choose_category("Wedding Card");
//!     if let Some(mut events) = designer.submit() {
//!         while let Some(event) = events.recv().await {
//!             println!("{:?}", event);
//!         }
//!     }
//!
//!     for message in designer.active_messages() {
//!         println!("{}: {}", message.role.as_str(), message.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`designer-types`**: threads, messages, attachments, theme, fixed texts
//! - **`designer-persist`**: storage backends and the persistence adapter
//! - **`designer-client`**: the remote chat service contract
//! - **`designer-core`**: thread store and message pipeline

pub mod app;
pub mod builder;
pub mod config;
pub mod logging;
pub mod prelude;

pub use app::Designer;
pub use builder::DesignerBuilder;
pub use config::{DesignerConfig, LoggingConfig, PipelineConfig, StorageConfig, StorageKind, ThemeConfig};
pub use logging::init_logging;

pub use designer_client::{DesignClient, DesignRequest};
pub use designer_core::{
    AwaitPolicy, Composer, Exchange, ExchangeEvent, ExchangeState, MessagePipeline,
    SharedThreadStore, ThreadStore,
};
pub use designer_persist::{
    InMemoryStorage, JsonFileStorage, PersistError, Persistence, StorageBackend, StorageKeys,
};
pub use designer_types::{Attachment, Message, Role, Theme, Thread, ThreadSummary};
