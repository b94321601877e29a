//! Fixed user-facing texts and the quick-prompt categories.

/// Reserved id of the primordial thread. It can never be deleted.
pub const DEFAULT_THREAD_ID: &str = "default";

pub const DEFAULT_THREAD_NAME: &str = "General Design";

pub const DEFAULT_WELCOME: &str = "👋 I am a Professional Designer. What can we design today?";

/// Transient content shown while a reply is in flight.
pub const THINKING_PLACEHOLDER: &str = "⏳ Thinking ...";

pub const FAILURE_NOTICE: &str = "⚠️ An error occurred. Please try again.";

pub const UPLOAD_MESSAGE: &str = "Uploaded an image for reference";

pub const UPLOAD_INPUT_SUGGESTION: &str = "Here's an image I want to use for design inspiration";

/// Title shown when the active pointer does not resolve to a thread.
pub const FALLBACK_THREAD_TITLE: &str = "Chat";

pub const DESIGN_CATEGORIES: [&str; 6] = [
    "Wedding Card",
    "Funeral Templates",
    "Business Cards",
    "Birthday Card",
    "Graduation Cards",
    "Posters",
];

/// Welcome message seeded into a freshly created thread.
pub fn new_thread_welcome(name: &str) -> String {
    format!("👋 New conversation about {}. What would you like to design?", name)
}

/// Draft text produced by a category quick-prompt.
pub fn category_prompt(category: &str) -> String {
    format!("Design a {} card", category)
}
