pub mod composer;
pub mod events;
pub mod exchange;
pub mod pipeline;
pub mod store;

pub use composer::Composer;
pub use events::ExchangeEvent;
pub use exchange::{Exchange, ExchangeState};
pub use pipeline::{AwaitPolicy, MessagePipeline};
pub use store::{SharedThreadStore, ThreadStore};
