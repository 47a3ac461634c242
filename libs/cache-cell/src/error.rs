use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Redis pool error: {0}")]
    PoolError(String),
}

impl From<deadpool_redis::PoolError> for CacheError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        CacheError::PoolError(err.to_string())
    }
}

impl From<deadpool_redis::CreatePoolError> for CacheError {
    fn from(err: deadpool_redis::CreatePoolError) -> Self {
        CacheError::PoolError(err.to_string())
    }
}
