use designer_types::{category_prompt, Attachment, UPLOAD_INPUT_SUGGESTION};

/// Draft of the next submission: input text plus selected files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    text: String,
    attachments: Vec<Attachment>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Replace the draft text with the quick prompt for `category`
    pub fn apply_category(&mut self, category: &str) {
        self.text = category_prompt(category);
    }

    /// Pre-fill the upload suggestion unless something is already typed
    pub fn suggest_upload_text(&mut self) {
        if self.text.is_empty() {
            self.text = UPLOAD_INPUT_SUGGESTION.to_string();
        }
    }

    pub fn is_submittable(&self) -> bool {
        !self.text.trim().is_empty() || !self.attachments.is_empty()
    }

    /// Take the draft, leaving the composer empty
    pub fn take(&mut self) -> (String, Vec<Attachment>) {
        (
            std::mem::take(&mut self.text),
            std::mem::take(&mut self.attachments),
        )
    }
}
