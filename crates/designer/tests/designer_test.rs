use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use designer::prelude::*;
use designer::{StorageKeys, StorageKind};
use designer_types::{DEFAULT_THREAD_ID, FAILURE_NOTICE, UPLOAD_INPUT_SUGGESTION, UPLOAD_MESSAGE};
use tokio::sync::Notify;

struct Replying(&'static str);

#[async_trait]
impl DesignClient for Replying {
    async fn send_design_request(&self, _request: DesignRequest) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct Failing;

#[async_trait]
impl DesignClient for Failing {
    async fn send_design_request(&self, _request: DesignRequest) -> Result<String> {
        Err(anyhow!("connection reset"))
    }
}

struct Gated(Arc<Notify>);

#[async_trait]
impl DesignClient for Gated {
    async fn send_design_request(&self, _request: DesignRequest) -> Result<String> {
        self.0.notified().await;
        Ok("released".to_string())
    }
}

fn designer_with(client: Arc<dyn DesignClient>, storage: &InMemoryStorage) -> Designer {
    DesignerBuilder::new()
        .storage(Arc::new(storage.clone()))
        .client(client)
        .build()
        .unwrap()
}

async fn drain(mut events: tokio::sync::mpsc::Receiver<ExchangeEvent>) -> Vec<ExchangeEvent> {
    let mut seen = Vec::new();
    while let Some(event) = events.recv().await {
        seen.push(event);
    }
    seen
}

#[test]
fn test_build_requires_client() {
    let result = DesignerBuilder::new()
        .storage(Arc::new(InMemoryStorage::new()))
        .build();
    assert!(result.is_err());
}

#[test]
fn test_fresh_designer() {
    let designer = designer_with(Arc::new(Replying("hi")), &InMemoryStorage::new());
    assert_eq!(designer.active_thread_id(), DEFAULT_THREAD_ID);
    assert_eq!(designer.active_thread_name(), "General Design");
    assert_eq!(designer.active_messages().len(), 1);
    assert_eq!(designer.theme(), Theme::Light);
    assert!(!designer.is_awaiting());
}

#[tokio::test]
async fn test_category_submission_round_trip() {
    let mut designer = designer_with(
        Arc::new(Replying("Here is a wedding card mockup")),
        &InMemoryStorage::new(),
    );

    designer.choose_category("Wedding Card");
    assert_eq!(designer.composer().text(), "Design a Wedding Card card");

    let events = designer.submit().unwrap();
    assert_eq!(designer.composer().text(), "");
    assert_eq!(designer.active_messages().len(), 3);

    let events = drain(events).await;
    assert_eq!(events.len(), 2);

    let messages = designer.active_messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1], Message::user("Design a Wedding Card card"));
    assert_eq!(messages[2], Message::assistant("Here is a wedding card mockup"));
}

#[tokio::test]
async fn test_empty_draft_is_not_submitted() {
    let mut designer = designer_with(Arc::new(Replying("unused")), &InMemoryStorage::new());
    assert!(!designer.can_submit());
    assert!(designer.submit().is_none());
    assert!(designer.submit_text("  ", Vec::new()).await.is_none());
    assert_eq!(designer.active_messages().len(), 1);
}

#[tokio::test]
async fn test_failure_then_resubmit() {
    let designer = designer_with(Arc::new(Failing), &InMemoryStorage::new());

    let exchange = designer.submit_text("Design a flyer", Vec::new()).await.unwrap();
    assert_eq!(exchange.state(), ExchangeState::SettledFailure);
    assert!(!designer.is_awaiting());

    let messages = designer.active_messages();
    assert_eq!(messages.len(), 3);
    assert!(messages[2].role.is_system());
    assert_eq!(messages[2].content, FAILURE_NOTICE);

    assert!(designer.submit_text("Design a flyer", Vec::new()).await.is_some());
    assert_eq!(designer.active_messages().len(), 5);
}

#[tokio::test]
async fn test_draft_kept_while_awaiting() {
    let release = Arc::new(Notify::new());
    let mut designer = designer_with(Arc::new(Gated(release.clone())), &InMemoryStorage::new());

    designer.composer_mut().set_text("first");
    let events = designer.submit().unwrap();
    assert!(designer.is_awaiting());

    designer.composer_mut().set_text("second");
    assert!(designer.submit().is_none());
    assert_eq!(designer.composer().text(), "second");

    release.notify_one();
    drain(events).await;
    assert!(!designer.is_awaiting());
    assert!(designer.submit().is_some());
}

#[test]
fn test_delete_active_thread_scenario() {
    let designer = designer_with(Arc::new(Replying("hi")), &InMemoryStorage::new());
    let id = designer.create_thread("Business Cards").unwrap();
    assert_eq!(designer.active_thread_id(), id);
    assert_eq!(designer.summaries().len(), 2);

    assert!(!designer.delete_thread(DEFAULT_THREAD_ID, |_| true));
    assert!(designer.delete_thread(&id, |_| true));

    assert_eq!(designer.summaries().len(), 1);
    assert_eq!(designer.active_thread_id(), DEFAULT_THREAD_ID);
}

#[test]
fn test_select_unknown_thread_is_ignored() {
    let designer = designer_with(Arc::new(Replying("hi")), &InMemoryStorage::new());
    let id = designer.create_thread("Posters").unwrap();
    assert!(!designer.select_thread("missing"));
    assert_eq!(designer.active_thread_id(), id);
}

#[test]
fn test_upload_attachments() {
    let mut designer = designer_with(Arc::new(Replying("hi")), &InMemoryStorage::new());
    let file = Attachment::new("reference.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff]);

    assert!(!designer.upload_attachments(Vec::new()));
    assert!(designer.upload_attachments(vec![file.clone()]));

    let messages = designer.active_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].content, UPLOAD_MESSAGE);
    assert_eq!(messages[1].attachments, vec![file.clone()]);

    assert_eq!(designer.composer().text(), UPLOAD_INPUT_SUGGESTION);
    assert_eq!(designer.composer().attachments(), &[file]);
}

#[test]
fn test_toggle_theme_persists() {
    let storage = InMemoryStorage::new();
    let mut designer = designer_with(Arc::new(Replying("hi")), &storage);

    assert_eq!(designer.toggle_theme(), Theme::Dark);
    drop(designer);

    let mut reopened = designer_with(Arc::new(Replying("hi")), &storage);
    assert_eq!(reopened.theme(), Theme::Dark);
    assert_eq!(reopened.toggle_theme(), Theme::Light);
}

#[test]
fn test_system_theme_fallback_from_config() {
    let mut config = DesignerConfig::default();
    config.theme.prefers_dark = true;

    let designer = DesignerBuilder::new()
        .config(config)
        .storage(Arc::new(InMemoryStorage::new()))
        .client(Arc::new(Replying("hi")))
        .build()
        .unwrap();
    assert_eq!(designer.theme(), Theme::Dark);
}

#[tokio::test]
async fn test_threads_survive_restart() {
    let storage = InMemoryStorage::new();
    let designer = designer_with(Arc::new(Replying("Logo v1")), &storage);
    let id = designer.create_thread("Logos").unwrap();
    designer.submit_text("Design a logo", Vec::new()).await.unwrap();
    drop(designer);

    let reopened = designer_with(Arc::new(Replying("unused")), &storage);
    assert_eq!(reopened.active_thread_id(), DEFAULT_THREAD_ID);
    assert!(reopened.select_thread(&id));
    let messages = reopened.active_messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2], Message::assistant("Logo v1"));
}

#[test]
fn test_memory_backend_from_config_with_custom_keys() {
    let mut config = DesignerConfig::default();
    config.storage.backend = StorageKind::Memory;
    config.storage.threads_key = "threads".to_string();

    let designer = DesignerBuilder::new()
        .config(config.clone())
        .client(Arc::new(Replying("hi")))
        .build()
        .unwrap();
    assert!(designer.create_thread("Cards").is_some());
    assert_eq!(
        config.storage.keys(),
        StorageKeys {
            threads: "threads".to_string(),
            theme: "theme".to_string(),
        }
    );
}

#[test]
fn test_file_backend_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = DesignerConfig::default();
    config.storage.dir = Some(dir.path().to_path_buf());

    let designer = DesignerBuilder::new()
        .config(config.clone())
        .client(Arc::new(Replying("hi")))
        .build()
        .unwrap();
    designer.create_thread("Cards").unwrap();
    drop(designer);

    assert!(dir.path().join("chatThreads.json").exists());
    let reopened = DesignerBuilder::new()
        .config(config)
        .client(Arc::new(Replying("hi")))
        .build()
        .unwrap();
    assert_eq!(reopened.summaries().len(), 2);
}

#[tokio::test]
async fn test_global_policy_override() {
    let release = Arc::new(Notify::new());
    let mut designer = DesignerBuilder::new()
        .storage(Arc::new(InMemoryStorage::new()))
        .client(Arc::new(Gated(release.clone())))
        .await_policy(AwaitPolicy::Global)
        .build()
        .unwrap();

    designer.composer_mut().set_text("first");
    let events = designer.submit().unwrap();

    designer.create_thread("Other").unwrap();
    designer.composer_mut().set_text("elsewhere");
    assert!(!designer.can_submit());
    assert!(designer.submit().is_none());

    release.notify_one();
    drain(events).await;
    assert!(designer.can_submit());
}

#[test]
fn test_submit_without_runtime_keeps_draft() {
    let mut designer = designer_with(Arc::new(Replying("unused")), &InMemoryStorage::new());
    designer.composer_mut().set_text("Design a logo");

    assert!(designer.submit().is_none());

    assert_eq!(designer.composer().text(), "Design a logo");
    assert_eq!(designer.active_messages().len(), 1);
    assert!(!designer.is_awaiting());
    assert!(designer.can_submit());
}
