use designer_core::{Composer, Exchange, ExchangeEvent, MessagePipeline, SharedThreadStore};
use designer_persist::Persistence;
use designer_types::{
    Attachment, Message, Theme, Thread, ThreadSummary, DESIGN_CATEGORIES, UPLOAD_MESSAGE,
};
use tokio::sync::mpsc;

/// Command surface for the presentation layer
///
/// Commands are plain method calls made from UI event handlers. Validation
/// failures are silent no-ops reported through the return value.
pub struct Designer {
    store: SharedThreadStore,
    pipeline: MessagePipeline,
    persistence: Persistence,
    theme: Theme,
    composer: Composer,
}

impl Designer {
    pub(crate) fn new(pipeline: MessagePipeline, persistence: Persistence, theme: Theme) -> Self {
        Self {
            store: pipeline.store().clone(),
            pipeline,
            persistence,
            theme,
            composer: Composer::new(),
        }
    }

    /// Create a builder for fluent construction
    pub fn builder() -> crate::builder::DesignerBuilder {
        crate::builder::DesignerBuilder::new()
    }

    pub fn store(&self) -> &SharedThreadStore {
        &self.store
    }

    pub fn pipeline(&self) -> &MessagePipeline {
        &self.pipeline
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    /// Submit the composer draft; the reply is awaited on a background task
    ///
    /// Needs a Tokio runtime, otherwise the submission is rejected. The draft is
    /// only cleared when the submission is accepted.
    pub fn submit(&mut self) -> Option<mpsc::Receiver<ExchangeEvent>> {
        if !self.composer.is_submittable() || !self.pipeline.can_submit() {
            return None;
        }
        let events = self.pipeline.spawn_submit(
            self.composer.text().to_string(),
            self.composer.attachments().to_vec(),
        )?;
        self.composer.take();
        Some(events)
    }

    /// Submit explicit text and files and wait for the exchange to settle
    pub async fn submit_text(
        &self,
        text: impl Into<String>,
        attachments: Vec<Attachment>,
    ) -> Option<Exchange> {
        self.pipeline.submit(text, attachments).await
    }

    pub fn create_thread(&self, name: &str) -> Option<String> {
        self.store.lock().create_thread(name)
    }

    pub fn delete_thread<F>(&self, thread_id: &str, confirm: F) -> bool
    where
        F: FnOnce(&Thread) -> bool,
    {
        self.store.lock().delete_thread(thread_id, confirm)
    }

    pub fn select_thread(&self, thread_id: &str) -> bool {
        self.store.lock().select_thread(thread_id)
    }

    /// Record picked files in the active thread and keep them in the draft
    pub fn upload_attachments(&mut self, files: Vec<Attachment>) -> bool {
        if files.is_empty() {
            return false;
        }

        self.composer.suggest_upload_text();
        for file in &files {
            self.composer.attach(file.clone());
        }

        let mut store = self.store.lock();
        let thread_id = store.active_thread_id().to_string();
        store.append_message(&thread_id, Message::user_with_attachments(UPLOAD_MESSAGE, files))
    }

    /// Pre-fill the draft with a category quick prompt
    pub fn choose_category(&mut self, category: &str) {
        self.composer.apply_category(category);
    }

    pub fn categories(&self) -> &'static [&'static str] {
        &DESIGN_CATEGORIES
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it immediately
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        if let Err(e) = self.persistence.save_theme(self.theme) {
            tracing::error!(error = %e, "Failed to persist theme");
        }
        tracing::debug!(theme = self.theme.as_str(), "Theme toggled");
        self.theme
    }

    pub fn active_thread_id(&self) -> String {
        self.store.lock().active_thread_id().to_string()
    }

    pub fn active_thread_name(&self) -> String {
        self.store.lock().active_thread_name().to_string()
    }

    pub fn active_messages(&self) -> Vec<Message> {
        self.store.lock().active_messages().to_vec()
    }

    pub fn summaries(&self) -> Vec<ThreadSummary> {
        self.store.lock().summaries()
    }

    /// Whether the active thread is waiting for a reply
    pub fn is_awaiting(&self) -> bool {
        let thread_id = self.active_thread_id();
        self.pipeline.is_awaiting(&thread_id)
    }

    pub fn can_submit(&self) -> bool {
        self.composer.is_submittable() && self.pipeline.can_submit()
    }
}
