use anyhow::Result;
use async_trait::async_trait;

/// Key/value cache used to memoise read models, such as a provider's
/// appointments for one day.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    async fn save(&self, key: &str, value: &str) -> Result<()>;

    async fn recover(&self, key: &str) -> Result<Option<String>>;

    /// Drops a single entry. Missing keys are not an error.
    async fn invalidate(&self, key: &str) -> Result<()>;

    /// Drops every entry whose key starts with `<prefix>:`.
    async fn invalidate_prefix(&self, prefix: &str) -> Result<()>;
}
