pub mod adapter;
pub mod backend;
pub mod backends;
pub mod error;

pub use adapter::{Persistence, StorageKeys, DEFAULT_THEME_KEY, DEFAULT_THREADS_KEY};
pub use backend::StorageBackend;
pub use backends::{InMemoryStorage, JsonFileStorage};
pub use error::{PersistError, Result};
