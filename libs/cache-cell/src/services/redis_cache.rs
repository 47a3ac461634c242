use anyhow::Result;
use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::{CacheError, CacheProvider};

const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

pub struct RedisCacheProvider {
    pool: Pool,
}

impl RedisCacheProvider {
    pub async fn new(config: &AppConfig) -> Result<Self, CacheError> {
        let redis_url = config
            .redis_url
            .clone()
            .unwrap_or_else(|| DEFAULT_REDIS_URL.to_string());

        let pool = Config::from_url(redis_url).create_pool(Some(Runtime::Tokio1))?;

        let mut conn = pool.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        info!("Redis cache provider initialized successfully");

        Ok(Self { pool })
    }

    pub fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    async fn get_connection(&self) -> Result<Connection, CacheError> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.set(key, value).await.map_err(CacheError::from)?;

        debug!("Cached value under {}", key);
        Ok(())
    }

    async fn recover(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.get(key).await.map_err(CacheError::from)?;
        Ok(value)
    }

    async fn invalidate(&self, key: &str) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let removed: i64 = conn.del(key).await.map_err(CacheError::from)?;

        debug!("Invalidated cache key {} ({} removed)", key, removed);
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let pattern = format!("{}:*", prefix);
        let keys: Vec<String> = conn.keys(&pattern).await.map_err(CacheError::from)?;

        if !keys.is_empty() {
            let _: () = conn.del(&keys).await.map_err(CacheError::from)?;
        }

        debug!("Invalidated {} cache keys matching {}", keys.len(), pattern);
        Ok(())
    }
}
