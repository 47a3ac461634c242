use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::CacheProvider;

/// Process-local cache. Used when Redis is not configured and in tests, where
/// [`InMemoryCacheProvider::invalidated_keys`] exposes every invalidation.
#[derive(Default)]
pub struct InMemoryCacheProvider {
    entries: RwLock<HashMap<String, String>>,
    invalidations: RwLock<Vec<String>>,
}

impl InMemoryCacheProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn invalidated_keys(&self) -> Vec<String> {
        self.invalidations.read().await.clone()
    }
}

#[async_trait]
impl CacheProvider for InMemoryCacheProvider {
    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn recover(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn invalidate(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        self.invalidations.write().await.push(key.to_string());

        debug!("Invalidated in-memory cache key {}", key);
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<()> {
        let scope = format!("{}:", prefix);
        let mut entries = self.entries.write().await;
        let matching: Vec<String> = entries
            .keys()
            .filter(|key| key.starts_with(&scope))
            .cloned()
            .collect();

        let mut invalidations = self.invalidations.write().await;
        for key in matching {
            entries.remove(&key);
            invalidations.push(key);
        }

        Ok(())
    }
}
