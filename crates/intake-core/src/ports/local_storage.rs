//! Local storage port
//!
//! A string key/value store that survives restarts, the desktop analogue of a
//! browser's `localStorage`. Values are opaque strings (JSON by convention).

use async_trait::async_trait;

#[async_trait]
pub trait LocalStoragePort: Send + Sync {
    /// Read a value; `Ok(None)` when the key was never written.
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Write a value, overwriting any previous one.
    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}

