//! High-level builder API for wiring the chat core

use std::sync::Arc;

use anyhow::{Context, Result};
use designer_client::DesignClient;
use designer_core::{AwaitPolicy, MessagePipeline, ThreadStore};
use designer_persist::{InMemoryStorage, JsonFileStorage, Persistence, StorageBackend};

use crate::app::Designer;
use crate::config::{DesignerConfig, StorageKind};

/// Builder for a [`Designer`]
///
/// # Example
///
/// ```rust,no_run
/// use designer::prelude::*;
/// use std::sync::Arc;
///
/// # struct MyClient;
/// # #[async_trait::async_trait]
/// # impl DesignClient for MyClient {
/// #     async fn send_design_request(&self, _: DesignRequest) -> anyhow::Result<String> {
/// #         Ok(String::new())
/// #     }
/// # }
/// # fn main() -> anyhow::Result<()> {
/// let designer = DesignerBuilder::new()
///     .config(DesignerConfig::load()?)
///     .client(Arc::new(MyClient))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct DesignerBuilder {
    config: DesignerConfig,
    storage: Option<Arc<dyn StorageBackend>>,
    client: Option<Arc<dyn DesignClient>>,
    await_policy: Option<AwaitPolicy>,
}

impl Default for DesignerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignerBuilder {
    pub fn new() -> Self {
        Self {
            config: DesignerConfig::default(),
            storage: None,
            client: None,
            await_policy: None,
        }
    }

    pub fn config(mut self, config: DesignerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this backend instead of the one named in the config
    pub fn storage(mut self, storage: Arc<dyn StorageBackend>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the remote chat client (required)
    pub fn client(mut self, client: Arc<dyn DesignClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Override the configured awaiting gate policy
    pub fn await_policy(mut self, policy: AwaitPolicy) -> Self {
        self.await_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<Designer> {
        let client = self
            .client
            .context("A design client is required. Use .client()")?;

        let storage = match self.storage {
            Some(storage) => storage,
            None => storage_from_config(&self.config)?,
        };
        let persistence = Persistence::new(storage).with_keys(self.config.storage.keys());

        let theme = persistence.load_theme(self.config.theme.system_default());
        let store = ThreadStore::open(persistence.clone()).into_shared();
        let policy = self.await_policy.unwrap_or(self.config.pipeline.await_policy);
        let pipeline = MessagePipeline::with_policy(store, client, policy);

        tracing::info!(?policy, theme = theme.as_str(), "Designer ready");
        Ok(Designer::new(pipeline, persistence, theme))
    }
}

fn storage_from_config(config: &DesignerConfig) -> Result<Arc<dyn StorageBackend>> {
    let storage: Arc<dyn StorageBackend> = match config.storage.backend {
        StorageKind::Memory => Arc::new(InMemoryStorage::new()),
        StorageKind::File => match &config.storage.dir {
            Some(dir) => Arc::new(JsonFileStorage::new(dir)),
            None => Arc::new(
                JsonFileStorage::in_data_dir().context("Failed to locate storage directory")?,
            ),
        },
    };
    Ok(storage)
}
