#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use designer_client::{DesignClient, DesignRequest};
use designer_core::{MessagePipeline, AwaitPolicy, SharedThreadStore, ThreadStore};
use designer_persist::{InMemoryStorage, Persistence};
use parking_lot::Mutex;
use tokio::sync::Notify;

/// Replies with a fixed text and records every request
#[derive(Default)]
pub struct ScriptedClient {
    pub reply: String,
    pub requests: Mutex<Vec<DesignRequest>>,
}

impl ScriptedClient {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl DesignClient for ScriptedClient {
    async fn send_design_request(&self, request: DesignRequest) -> Result<String> {
        self.requests.lock().push(request);
        Ok(self.reply.clone())
    }
}

pub struct FailingClient;

#[async_trait]
impl DesignClient for FailingClient {
    async fn send_design_request(&self, _request: DesignRequest) -> Result<String> {
        Err(anyhow!("service unavailable"))
    }
}

/// Holds every request until `release` is notified
pub struct GatedClient {
    pub release: Arc<Notify>,
    pub reply: String,
}

impl GatedClient {
    pub fn new(reply: &str) -> (Arc<Self>, Arc<Notify>) {
        let release = Arc::new(Notify::new());
        let client = Arc::new(Self {
            release: Arc::clone(&release),
            reply: reply.to_string(),
        });
        (client, release)
    }
}

#[async_trait]
impl DesignClient for GatedClient {
    async fn send_design_request(&self, _request: DesignRequest) -> Result<String> {
        self.release.notified().await;
        Ok(self.reply.clone())
    }
}

/// Never settles
pub struct PendingClient;

#[async_trait]
impl DesignClient for PendingClient {
    async fn send_design_request(&self, _request: DesignRequest) -> Result<String> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

pub fn open_store() -> (InMemoryStorage, SharedThreadStore) {
    let storage = InMemoryStorage::new();
    let store = ThreadStore::open(Persistence::new(Arc::new(storage.clone()))).into_shared();
    (storage, store)
}

pub fn pipeline_with(client: Arc<dyn DesignClient>, policy: AwaitPolicy) -> MessagePipeline {
    let (_, store) = open_store();
    MessagePipeline::with_policy(store, client, policy)
}
