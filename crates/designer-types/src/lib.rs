pub mod attachment;
pub mod message;
pub mod templates;
pub mod theme;
pub mod thread;

pub use attachment::Attachment;
pub use message::{Message, Role};
pub use templates::{
    category_prompt, new_thread_welcome, DESIGN_CATEGORIES, DEFAULT_THREAD_ID,
    DEFAULT_THREAD_NAME, DEFAULT_WELCOME, FAILURE_NOTICE, FALLBACK_THREAD_TITLE,
    THINKING_PLACEHOLDER, UPLOAD_INPUT_SUGGESTION, UPLOAD_MESSAGE,
};
pub use theme::Theme;
pub use thread::{Thread, ThreadSummary};
