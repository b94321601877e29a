use crate::error::Result;

/// Key-value storage for serialized text blobs
///
/// Implementations hold no business logic: `set` overwrites unconditionally and
/// `get` returns whatever was last written under the key.
pub trait StorageBackend: Send + Sync {
    /// Read the blob stored under `key`, `None` when nothing was written yet
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the blob stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
